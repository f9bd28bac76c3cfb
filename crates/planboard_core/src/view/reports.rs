//! Report aggregation projection.
//!
//! # Responsibility
//! - Fold the projects collection into one deterministic set of counters.
//!
//! # Invariants
//! - `today` is supplied by the caller so the fold stays pure.
//! - Done projects never count as overdue.

use crate::model::project::{Project, ProjectStatus};

/// Aggregate counters shown on the reports tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// All projects in the collection.
    pub total: usize,
    /// Projects with status `upcoming`.
    pub upcoming: usize,
    /// Projects with status `in_progress`.
    pub in_progress: usize,
    /// Projects with status `done`.
    pub done: usize,
    /// Open projects whose deadline is before `today`.
    pub overdue: usize,
    /// Task rows across all projects, done or not.
    pub tasks_total: usize,
}

/// Folds the collection into report counters as of `today` (`YYYY-MM-DD`).
pub fn status_report(projects: &[Project], today: &str) -> StatusReport {
    let mut report = StatusReport {
        total: projects.len(),
        ..StatusReport::default()
    };

    for project in projects {
        match project.status {
            ProjectStatus::Upcoming => report.upcoming += 1,
            ProjectStatus::InProgress => report.in_progress += 1,
            ProjectStatus::Done => report.done += 1,
        }
        if project.is_overdue(today) {
            report.overdue += 1;
        }
        report.tasks_total += project.tasks.len();
    }

    report
}
