//! Dashboard listing projection.
//!
//! # Responsibility
//! - Narrow the projects collection by status filter and title search.
//!
//! # Invariants
//! - Source order is preserved; the projection never reorders or mutates.
//! - An empty search term matches every project.

use crate::model::project::{Project, ProjectStatus};

/// Status narrowing applied to the dashboard listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status narrowing.
    #[default]
    All,
    /// Only projects in the given status.
    Only(ProjectStatus),
}

impl StatusFilter {
    /// Returns whether `status` passes this filter.
    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }
}

/// Projects passing both the status filter and the title search.
///
/// The search term matches case-insensitively anywhere in the title; the
/// empty term matches everything. Results borrow from `projects` in their
/// original order.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    filter: StatusFilter,
    search: &str,
) -> Vec<&'a Project> {
    let needle = search.to_lowercase();
    projects
        .iter()
        .filter(|project| filter.matches(project.status))
        .filter(|project| needle.is_empty() || project.title.to_lowercase().contains(&needle))
        .collect()
}
