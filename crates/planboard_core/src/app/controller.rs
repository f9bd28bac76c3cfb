//! Application controller.
//!
//! # Responsibility
//! - Route user intents to the stores and keep view state coherent.
//! - Expose the read surface the render boundary consumes.
//!
//! # Invariants
//! - Draft ids are unique against both the collection and ids issued earlier
//!   in this session.
//! - Declined confirmations leave stores and storage untouched.
//! - View state is never persisted; a restart always lands on the dashboard.

use crate::app::view_state::{Screen, Tab, ViewState};
use crate::model::project::{Project, ProjectId};
use crate::model::user::User;
use crate::repo::slot_repo::{RepoResult, SlotRepository};
use crate::store::auth_store::{AuthMode, AuthStore};
use crate::store::project_store::ProjectStore;
use crate::view::dashboard::{filter_projects, StatusFilter};
use crate::view::reports::{status_report, StatusReport};
use chrono::Utc;
use log::info;

/// Intent router composing the stores with transient view state.
pub struct AppController<R: SlotRepository> {
    projects: ProjectStore<R>,
    auth: AuthStore<R>,
    view: ViewState,
    last_issued_id: ProjectId,
}

impl<R: SlotRepository + Clone> AppController<R> {
    /// Hydrates both stores and seeds the id allocator.
    ///
    /// # Side effects
    /// - Reads all three slots.
    /// - Emits an `app_start` logging event with collection sizes.
    pub fn start(repo: R) -> RepoResult<Self> {
        let mut projects = ProjectStore::new(repo.clone());
        projects.load()?;
        let mut auth = AuthStore::new(repo);
        auth.load()?;

        let last_issued_id = projects.max_id().unwrap_or(0);
        info!(
            "event=app_start module=app status=ok projects={} users={} session_present={}",
            projects.projects().len(),
            auth.users().len(),
            auth.session().is_some()
        );

        Ok(Self {
            projects,
            auth,
            view: ViewState::default(),
            last_issued_id,
        })
    }
}

impl<R: SlotRepository> AppController<R> {
    /// Screen the render boundary should show right now.
    pub fn screen(&self) -> Screen {
        if self.auth.session().is_some() {
            return Screen::Main;
        }
        match self.auth.auth_mode() {
            AuthMode::Login => Screen::Login,
            AuthMode::Signup => Screen::Signup,
        }
    }

    /// Full projects collection in insertion order.
    pub fn projects(&self) -> &[Project] {
        self.projects.projects()
    }

    /// Dashboard listing narrowed by the current filter and search term.
    pub fn filtered_projects(&self) -> Vec<&Project> {
        filter_projects(self.projects.projects(), self.view.filter, &self.view.search)
    }

    /// Report counters as of the current date.
    pub fn report(&self) -> StatusReport {
        self.report_as_of(&today())
    }

    /// Report counters as of an explicit `YYYY-MM-DD` date.
    pub fn report_as_of(&self, today: &str) -> StatusReport {
        status_report(self.projects.projects(), today)
    }

    /// Registered users in registration order.
    pub fn users(&self) -> &[User] {
        self.auth.users()
    }

    /// The signed-in user, if any.
    pub fn session(&self) -> Option<&User> {
        self.auth.session()
    }

    /// Current logged-out gate form.
    pub fn auth_mode(&self) -> AuthMode {
        self.auth.auth_mode()
    }

    /// Tab currently in focus.
    pub fn active_tab(&self) -> Tab {
        self.view.active_tab
    }

    /// Current dashboard status filter.
    pub fn filter(&self) -> StatusFilter {
        self.view.filter
    }

    /// Current dashboard search term.
    pub fn search(&self) -> &str {
        &self.view.search
    }

    /// Open modal draft, if any.
    pub fn modal_draft(&self) -> Option<&Project> {
        self.view.draft.as_ref()
    }

    /// Mutable access to the open draft for form editing.
    pub fn modal_draft_mut(&mut self) -> Option<&mut Project> {
        self.view.draft.as_mut()
    }

    /// Opens the modal on a fresh draft and focuses the dashboard tab.
    ///
    /// The draft id is unique against the collection and every id issued
    /// earlier in this session, staying timestamp-derived where possible.
    pub fn open_new_project(&mut self) -> &Project {
        let id = self.fresh_project_id();
        self.view.active_tab = Tab::Dashboard;
        self.view.draft.insert(Project::draft(id))
    }

    /// Opens the modal on a copy of an existing record.
    ///
    /// An absent id leaves all state untouched and returns false.
    pub fn open_edit_project(&mut self, id: ProjectId) -> bool {
        match self.projects.get(id) {
            Some(project) => {
                self.view.draft = Some(project.clone());
                true
            }
            None => false,
        }
    }

    /// Commits the open draft through the project store and closes the modal.
    ///
    /// Returns whether a draft was committed; no open draft is a no-op.
    pub fn save_draft(&mut self) -> RepoResult<bool> {
        let Some(draft) = self.view.draft.take() else {
            return Ok(false);
        };
        self.projects.upsert(draft)?;
        Ok(true)
    }

    /// Discards the open draft and closes the modal without persisting.
    pub fn cancel_draft(&mut self) {
        self.view.draft = None;
    }

    /// Removes one project; returns whether a record was removed.
    pub fn delete_project(&mut self, id: ProjectId) -> RepoResult<bool> {
        self.projects.remove(id)
    }

    /// Empties the projects collection when `confirmed` is true.
    ///
    /// A declined confirmation leaves the store untouched and performs no
    /// persistence call.
    pub fn clear_all_projects(&mut self, confirmed: bool) -> RepoResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.projects.replace_all(Vec::new())?;
        Ok(true)
    }

    /// Registers a new account; the gate returns to the login form.
    pub fn sign_up(&mut self, user: User) -> RepoResult<()> {
        self.auth.register_user(user)
    }

    /// Starts a session for an already-validated user.
    pub fn log_in(&mut self, user: User) -> RepoResult<()> {
        self.auth.login(user)
    }

    /// Ends the session and returns to the logged-out gate.
    ///
    /// Tab, filter, search, and any open draft survive for the next login.
    pub fn sign_out(&mut self) -> RepoResult<()> {
        self.auth.logout()
    }

    /// Shows the signup form at the logged-out gate.
    pub fn switch_to_signup(&mut self) {
        self.auth.switch_to_signup();
    }

    /// Shows the login form at the logged-out gate.
    pub fn switch_to_login(&mut self) {
        self.auth.switch_to_login();
    }

    /// Removes a registered account by identity key.
    ///
    /// The current session is left as-is even when it references the removed
    /// account.
    pub fn remove_user(&mut self, identity: &str) -> RepoResult<bool> {
        self.auth.remove_user(identity)
    }

    /// Focuses a main-application tab.
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.view.active_tab = tab;
    }

    /// Sets the dashboard status filter.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.view.filter = filter;
    }

    /// Sets the dashboard search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.search = term.into();
    }

    /// Final flush of all three slots.
    ///
    /// Every mutation already persisted; this makes the teardown contract
    /// explicit and emits an `app_stop` logging event.
    pub fn shutdown(self) -> RepoResult<()> {
        self.projects.flush()?;
        self.auth.flush()?;
        info!("event=app_stop module=app status=ok");
        Ok(())
    }

    fn fresh_project_id(&mut self) -> ProjectId {
        let now_ms = Utc::now().timestamp_millis();
        let floor = self.last_issued_id.max(self.projects.max_id().unwrap_or(0));
        let id = if now_ms > floor { now_ms } else { floor + 1 };
        self.last_issued_id = id;
        id
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
