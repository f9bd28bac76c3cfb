//! Core application state engine for Planboard.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use app::controller::AppController;
pub use app::view_state::{Screen, Tab, ViewState};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{
    normalize_projects, NormalizeStats, Project, ProjectId, ProjectStatus, Task,
};
pub use model::user::User;
pub use repo::slot_repo::{RepoError, RepoResult, Slot, SlotRepository, SqliteSlotRepository};
pub use store::auth_store::{AuthMode, AuthStore};
pub use store::project_store::ProjectStore;
pub use view::dashboard::{filter_projects, StatusFilter};
pub use view::reports::{status_report, StatusReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
