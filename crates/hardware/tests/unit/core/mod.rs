//! # Core Tests
//!
//! Scheduling structures in isolation, then the cycle loop end to end.


/// Issue queue ordering and refusal.
pub mod issue;

/// Compute and banked-memory latency.
pub mod latency;

/// Resource occupancy and countdown.
pub mod resources;
