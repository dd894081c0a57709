//! Shared test infrastructure.

/// Core construction and stepping helpers.
pub mod harness;
