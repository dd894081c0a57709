//! Issue and execution pipeline.
//!
//! This module contains the scheduling structures the core steps each cycle.
//! It includes the following components:
//! 1. **Scoreboard:** The register busy-board gating admission.
//! 2. **Issue:** The three bounded per-class instruction queues.
//! 3. **Resources:** Busy/countdown state of each execution resource.
//! 4. **Latency:** Compute and banked-memory occupancy calculations.

/// Per-class bounded FIFO issue queues.
pub mod issue;

/// Compute and memory latency model.
pub mod latency;

/// Execution resource arbitration.
pub mod resources;

/// Register busy-board.
pub mod scoreboard;

pub use issue::{IssueQueues, Refused};
pub use latency::{BankReport, LatencyModel};
pub use resources::{Resource, ResourceArbiter};
pub use scoreboard::BusyBoard;
