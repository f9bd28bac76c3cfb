//! Project collection store.
//!
//! # Responsibility
//! - Keep the working projects collection in insertion order.
//! - Write the full collection through to its slot after every mutation.
//!
//! # Invariants
//! - Ids stay unique; upsert replaces in place instead of appending twice.
//! - Every mutation persists exactly once, including no-op removals.

use crate::model::project::{normalize_projects, Project, ProjectId};
use crate::repo::slot_repo::{RepoResult, SlotRepository};

/// Ordered, write-through store over the projects slot.
pub struct ProjectStore<R: SlotRepository> {
    repo: R,
    projects: Vec<Project>,
}

impl<R: SlotRepository> ProjectStore<R> {
    /// Creates an empty store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            projects: Vec::new(),
        }
    }

    /// Hydrates the working collection from the projects slot.
    ///
    /// Replaces any in-memory state; does not write back.
    pub fn load(&mut self) -> RepoResult<()> {
        self.projects = self.repo.load_projects()?;
        Ok(())
    }

    /// The working collection in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up one project by id.
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Largest id currently in the collection.
    pub fn max_id(&self) -> Option<ProjectId> {
        self.projects.iter().map(|project| project.id).max()
    }

    /// Inserts or replaces one record, then persists the collection.
    ///
    /// An existing id is replaced at its current position; a new id appends.
    pub fn upsert(&mut self, mut record: Project) -> RepoResult<()> {
        record.normalize();
        match self
            .projects
            .iter()
            .position(|project| project.id == record.id)
        {
            Some(at) => self.projects[at] = record,
            None => self.projects.push(record),
        }
        self.repo.save_projects(&self.projects)
    }

    /// Removes one record by id, then persists the collection.
    ///
    /// Persists exactly once whether or not the id was present; returns
    /// whether a record was removed.
    pub fn remove(&mut self, id: ProjectId) -> RepoResult<bool> {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        let removed = self.projects.len() != before;
        self.repo.save_projects(&self.projects)?;
        Ok(removed)
    }

    /// Replaces the whole collection, normalizing it first, then persists.
    pub fn replace_all(&mut self, projects: Vec<Project>) -> RepoResult<()> {
        let (projects, _stats) = normalize_projects(projects);
        self.projects = projects;
        self.repo.save_projects(&self.projects)
    }

    /// Persists the current working collection as-is.
    pub fn flush(&self) -> RepoResult<()> {
        self.repo.save_projects(&self.projects)
    }
}
