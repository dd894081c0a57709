//! Simulation driver and workload loading.
//!
//! Provides the loader that reads an I/O directory into a workload, and the
//! simulator that runs it to completion and dumps the final state.

/// Workload loading from an I/O directory.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
