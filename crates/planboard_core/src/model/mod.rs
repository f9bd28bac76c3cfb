//! Domain model for projects, users, and sessions.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep record shapes aligned with the persisted slot payloads.
//!
//! # Invariants
//! - Every project is identified by a stable integer `ProjectId`.
//! - A session is a snapshot of a user record, not a reference into the
//!   users collection.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod project;
pub mod user;
