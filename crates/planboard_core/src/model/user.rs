//! User account model.
//!
//! # Responsibility
//! - Define the registered-account record and the session identity key.
//!
//! # Invariants
//! - `email` is the identity key for login and account removal.
//! - Credentials are stored as provided; hashing is out of scope here.

use serde::{Deserialize, Serialize};

/// Registered account as kept in the users collection and in the session slot.
///
/// Identity is the one field the persistence boundary cannot default; name and
/// credential decode leniently to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name shown in the header once signed in.
    #[serde(default)]
    pub name: String,
    /// Identity key; the embedding login form matches it against registered
    /// accounts.
    pub email: String,
    /// Login credential, opaque to core logic; the login form compares it
    /// before calling `login`.
    #[serde(default)]
    pub credential: String,
}

impl User {
    /// Creates an account record from its three fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential: credential.into(),
        }
    }

    /// The identity key used for account removal and login-form matching.
    pub fn identity(&self) -> &str {
        &self.email
    }
}
