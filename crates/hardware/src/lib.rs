//! Vector core timing simulator library.
//!
//! This crate implements a cycle-level timing model of a decoupled vector core with the following:
//! 1. **Core:** Fetch, decode/admit, dispatch and retire over a register busy-board.
//! 2. **Pipeline:** Three bounded issue queues, six execution resources, and a latency model
//!    for lane-parallel compute and banked vector memory.
//! 3. **ISA:** Text assembly decoding for vector, memory, scalar and control instructions.
//! 4. **SoC:** Instruction memory plus scalar (SDMEM) and vector (VDMEM) data memories.
//! 5. **Simulation:** Workload loading, configuration, statistics and state dumps.

/// Common types and constants (registers, register files, errors).
pub mod common;
/// Simulator configuration (defaults, flat and JSON sources, validation).
pub mod config;
/// Vector core (architectural vector state, pipeline structures, cycle loop).
pub mod core;
/// Instruction set (opcodes, classes, decoding).
pub mod isa;
/// Workload loader and top-level simulator.
pub mod sim;
/// Memories around the core (instruction memory, SDMEM, VDMEM).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::load` or `Config::default()`.
pub use crate::config::Config;
/// The vector core; holds all scheduling state and stats.
pub use crate::core::VectorCore;
/// Top-level simulator owning the core and the data memories.
pub use crate::sim::Simulator;
/// Data memories attached to the core; construct with `System::new`.
pub use crate::soc::System;
