//! Architectural state of the vector core.
//!
//! This module contains the architectural state the decoder reads and mutates.
//! It includes the following modules:
//! 1. **Vector:** Vector length and mask registers and their snapshots.

/// Vector length and mask state.
pub mod vector;

pub use vector::{VectorMask, VectorSnapshot, VectorState};
