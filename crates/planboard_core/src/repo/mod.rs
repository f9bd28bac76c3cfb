//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed-slot data access contract used by the stores.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - Collection slots decode to their empty default when missing or
//!   undecodable; reads never surface decode failures as errors.
//! - Every slot write serializes the full value it replaces.

pub mod slot_repo;
