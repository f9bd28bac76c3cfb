//! Pure read-model projections over the projects collection.
//!
//! # Responsibility
//! - Derive dashboard listings and report aggregates from store state.
//! - Stay side-effect free; projections are recomputed per call.

pub mod dashboard;
pub mod reports;
