//! Registered-user and session store.
//!
//! # Responsibility
//! - Keep the registered users and current session in memory.
//! - Write both through their slots on every mutation.
//! - Track which auth form the logged-out gate shows.
//!
//! # Invariants
//! - The auth mode always starts at `Login` after hydration.
//! - Registration never inspects existing identities, and login never
//!   inspects credentials; validation belongs to the embedding forms.
//! - Removing a user leaves the current session untouched.

use crate::model::user::User;
use crate::repo::slot_repo::{RepoResult, SlotRepository};

/// Which form the logged-out gate presents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Existing-account login form.
    #[default]
    Login,
    /// New-account signup form.
    Signup,
}

/// Write-through store over the users and session slots.
pub struct AuthStore<R: SlotRepository> {
    repo: R,
    users: Vec<User>,
    session: Option<User>,
    auth_mode: AuthMode,
}

impl<R: SlotRepository> AuthStore<R> {
    /// Creates an empty store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            users: Vec::new(),
            session: None,
            auth_mode: AuthMode::Login,
        }
    }

    /// Hydrates users and session from their slots.
    ///
    /// The auth mode is not persisted; it resets to `Login` on every load.
    pub fn load(&mut self) -> RepoResult<()> {
        self.users = self.repo.load_users()?;
        self.session = self.repo.load_session()?;
        self.auth_mode = AuthMode::Login;
        Ok(())
    }

    /// Registered users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The signed-in user, if any.
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// Current logged-out gate form.
    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Appends a registered account and persists the collection.
    ///
    /// No duplicate-identity check happens here; the embedding login form
    /// resolves collisions by first match. Completing a signup returns the
    /// gate to the login form.
    pub fn register_user(&mut self, user: User) -> RepoResult<()> {
        self.users.push(user);
        self.repo.save_users(&self.users)?;
        self.auth_mode = AuthMode::Login;
        Ok(())
    }

    /// Sets and persists the session.
    ///
    /// Credential checks belong to the caller; the store records whoever it
    /// is handed.
    pub fn login(&mut self, user: User) -> RepoResult<()> {
        self.session = Some(user);
        self.repo.save_session(self.session.as_ref())
    }

    /// Clears and persists the session and returns the gate to `Login`.
    pub fn logout(&mut self) -> RepoResult<()> {
        self.session = None;
        self.auth_mode = AuthMode::Login;
        self.repo.save_session(None)
    }

    /// Removes a registered account by identity key and persists.
    ///
    /// Persists exactly once whether or not the identity was present. The
    /// current session is left as-is even when it references the removed
    /// account.
    pub fn remove_user(&mut self, identity: &str) -> RepoResult<bool> {
        let before = self.users.len();
        self.users.retain(|user| user.identity() != identity);
        let removed = self.users.len() != before;
        self.repo.save_users(&self.users)?;
        Ok(removed)
    }

    /// Shows the signup form at the logged-out gate.
    pub fn switch_to_signup(&mut self) {
        self.auth_mode = AuthMode::Signup;
    }

    /// Shows the login form at the logged-out gate.
    pub fn switch_to_login(&mut self) {
        self.auth_mode = AuthMode::Login;
    }

    /// Persists users and session as they currently stand.
    pub fn flush(&self) -> RepoResult<()> {
        self.repo.save_users(&self.users)?;
        self.repo.save_session(self.session.as_ref())
    }
}
