//! Transient per-session view state.
//!
//! # Responsibility
//! - Hold everything the render boundary needs that is never persisted.
//!
//! # Invariants
//! - Values are typed enums; unrecognized tabs or filters are
//!   unrepresentable.
//! - A `Some` draft means the project modal is open.

use crate::model::project::Project;
use crate::view::dashboard::StatusFilter;

/// Main-application tab focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// Filtered project listing.
    #[default]
    Dashboard,
    /// Full project listing.
    Projects,
    /// Aggregated counters.
    Reports,
    /// Account management.
    Settings,
}

/// Top-level screen the render boundary should show.
///
/// Derived from session presence and auth mode; exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Logged-out gate showing the login form.
    Login,
    /// Logged-out gate showing the signup form.
    Signup,
    /// The signed-in application.
    Main,
}

/// Unpersisted view state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Tab currently in focus.
    pub active_tab: Tab,
    /// Dashboard status narrowing.
    pub filter: StatusFilter,
    /// Dashboard title search term.
    pub search: String,
    /// Open modal draft, if any.
    pub draft: Option<Project>,
}
