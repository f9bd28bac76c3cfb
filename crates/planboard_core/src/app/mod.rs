//! Application controller and view state.
//!
//! # Responsibility
//! - Compose the stores behind one intent-routing surface.
//! - Own the transient view state consumed by the render boundary.
//!
//! # Invariants
//! - Exactly one `Screen` applies at any time.
//! - Every mutation routed here persists through the stores it touches.

pub mod controller;
pub mod view_state;
