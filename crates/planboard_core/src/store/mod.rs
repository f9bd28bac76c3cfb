//! Stateful stores orchestrating domain collections over slot persistence.
//!
//! # Responsibility
//! - Own the in-memory working copies of projects, users, and the session.
//! - Write through to the slot repository on every mutation.
//!
//! # Invariants
//! - Store state and persisted state agree after every successful mutation.
//! - Stores never bypass repository normalization or encoding contracts.

pub mod auth_store;
pub mod project_store;
