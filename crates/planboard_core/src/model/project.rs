//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record owned by the project store.
//! - Provide draft construction and persistence-boundary normalization.
//!
//! # Invariants
//! - `id` values are unique within a collection at all times.
//! - `deadline` is either empty or an ISO `YYYY-MM-DD` date string.
//! - Task rows stay opaque to core logic beyond being enumerable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Timestamp-derived project identifier (epoch milliseconds at draft time).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;

static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid deadline regex"));

/// Lifecycle state used by dashboard filtering and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not started yet; the default for fresh drafts.
    #[default]
    Upcoming,
    /// Work is in progress.
    InProgress,
    /// Completed; excluded from overdue accounting.
    Done,
}

impl ProjectStatus {
    /// Stable lowercase label, matching the persisted wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// Checklist row edited inside the project modal.
///
/// The editing UI owns this shape; core code only enumerates task rows, so
/// every field decodes leniently to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row label as typed in the modal.
    #[serde(default)]
    pub label: String,
    /// Checkbox state.
    #[serde(default)]
    pub done: bool,
}

/// Canonical project record.
///
/// A record without an `id` does not decode; identity is the one field the
/// persistence boundary cannot default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique timestamp-derived identifier.
    pub id: ProjectId,
    /// Title; may be empty while a draft is still being edited.
    #[serde(default)]
    pub title: String,
    /// Assigned agent name or reference.
    #[serde(default)]
    pub agent: String,
    /// Ordered task rows; structure owned by the editing UI.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// ISO `YYYY-MM-DD` deadline, or empty when none is set.
    #[serde(default)]
    pub deadline: String,
}

impl Project {
    /// Creates an empty draft with the given identifier.
    ///
    /// # Invariants
    /// - All text fields start empty, the task list starts empty.
    /// - Status starts as `upcoming`.
    pub fn draft(id: ProjectId) -> Self {
        Self {
            id,
            title: String::new(),
            agent: String::new(),
            tasks: Vec::new(),
            status: ProjectStatus::Upcoming,
            deadline: String::new(),
        }
    }

    /// Returns whether `value` is an acceptable deadline string.
    ///
    /// Empty means "no deadline"; anything else must match `YYYY-MM-DD`.
    pub fn is_valid_deadline(value: &str) -> bool {
        value.is_empty() || DEADLINE_RE.is_match(value)
    }

    /// Resets a malformed deadline to the documented empty default.
    ///
    /// Returns whether the record was changed.
    pub fn normalize(&mut self) -> bool {
        if Self::is_valid_deadline(&self.deadline) {
            return false;
        }
        self.deadline.clear();
        true
    }

    /// Returns whether this project counts as overdue relative to `today`.
    ///
    /// Done projects are never overdue; ISO `YYYY-MM-DD` strings make the
    /// comparison plain lexicographic ordering.
    pub fn is_overdue(&self, today: &str) -> bool {
        self.status != ProjectStatus::Done
            && !self.deadline.is_empty()
            && Self::is_valid_deadline(&self.deadline)
            && self.deadline.as_str() < today
    }
}

/// Outcome counters from collection normalization at the persistence boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Malformed deadlines reset to empty.
    pub deadlines_reset: usize,
    /// Duplicate ids collapsed into one record.
    pub duplicates_collapsed: usize,
}

impl NormalizeStats {
    /// Returns whether normalization changed anything.
    pub fn changed(self) -> bool {
        self.deadlines_reset > 0 || self.duplicates_collapsed > 0
    }
}

/// Enforces collection invariants on decoded or bulk-imported data.
///
/// Duplicate ids collapse to a single record holding the last occurrence's
/// value at the first occurrence's position, matching upsert semantics.
/// Malformed deadlines reset to empty per record.
pub fn normalize_projects(raw: Vec<Project>) -> (Vec<Project>, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let mut projects: Vec<Project> = Vec::with_capacity(raw.len());

    for mut project in raw {
        if project.normalize() {
            stats.deadlines_reset += 1;
        }
        match projects.iter().position(|seen| seen.id == project.id) {
            Some(at) => {
                projects[at] = project;
                stats.duplicates_collapsed += 1;
            }
            None => projects.push(project),
        }
    }

    (projects, stats)
}
