//! Core processor implementation.
//!
//! This module contains the vector core: its architectural vector state, the
//! issue and execution pipeline structures, and the cycle loop that coordinates
//! them.

/// Architectural state (vector length and mask registers).
pub mod arch;

/// Vector core definition and the cycle loop.
pub mod cpu;

/// Busy-board, issue queues, resources and latency model.
pub mod pipeline;

pub use self::cpu::{CoreState, HaltReason, VectorCore};
