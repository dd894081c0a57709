//! Vector Core Definition and Initialization.
//!
//! This module defines the central `VectorCore` structure, which owns every piece of
//! scheduling state. It coordinates the following:
//! 1. **Front End:** Program counter, the fetched line awaiting decode, and the decoded
//!    instruction held while admission stalls.
//! 2. **Architectural State:** Scalar and vector register files plus the live VLR/VMR.
//! 3. **Back End:** Busy-board, issue queues, resource arbiter and latency model.
//! 4. **Lifecycle:** The `Running`/`Halted` state machine and the cycle bound.

/// Cycle loop and pipeline stages.
pub mod execution;

use std::fmt;

use crate::common::constants::{MAX_VECTOR_LENGTH, NUM_SCALAR_REGS, NUM_VECTOR_REGS};
use crate::common::error::DecodeError;
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::core::arch::vector::VectorState;
use crate::core::pipeline::{BusyBoard, IssueQueues, LatencyModel, ResourceArbiter};
use crate::isa::instruction::Instruction;
use crate::soc::traits::InstructionSource;
use crate::stats::SimStats;

/// Why the core stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// Fetch ended and every queue and resource emptied.
    Drained,
    /// A line named a mnemonic outside the instruction set.
    UnknownInstruction {
        /// Program counter of the line.
        pc: usize,
        /// The unrecognized mnemonic.
        mnemonic: String,
    },
    /// A line had a known mnemonic but malformed operands.
    MalformedInstruction {
        /// Program counter of the line.
        pc: usize,
        /// What was wrong with it.
        error: DecodeError,
    },
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drained => f.write_str("drained"),
            Self::UnknownInstruction { pc, mnemonic } => {
                write!(f, "unknown instruction `{mnemonic}` at line {pc}")
            }
            Self::MalformedInstruction { pc, error } => {
                write!(f, "malformed instruction at line {pc}: {error}")
            }
        }
    }
}

/// Lifecycle state of the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreState {
    /// Cycles are still being simulated.
    Running,
    /// The core has stopped for good.
    Halted(HaltReason),
}

/// The vector core and all of its scheduling state.
pub struct VectorCore {
    program: Box<dyn InstructionSource>,
    latency: LatencyModel,
    max_cycles: u64,

    /// Program counter of the next line to fetch.
    pub pc: usize,
    /// Cycles simulated so far.
    pub cycle: u64,
    /// Live vector length and mask.
    pub vector: VectorState,
    /// Scalar register file (8 × 1).
    pub srf: RegisterFile,
    /// Vector register file (8 × 64).
    pub vrf: RegisterFile,
    /// Register busy-board.
    pub busy: BusyBoard,
    /// Issue queues.
    pub queues: IssueQueues,
    /// Execution resources.
    pub resources: ResourceArbiter,
    /// Performance statistics.
    pub stats: SimStats,

    fetched: Option<(usize, Vec<String>)>,
    held: Option<Instruction>,
    fetch_stalled: bool,
    fetch_done: bool,
    state: CoreState,
}

impl fmt::Debug for VectorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorCore")
            .field("pc", &self.pc)
            .field("cycle", &self.cycle)
            .field("program_len", &self.program.len())
            .field("vector", &self.vector)
            .field("busy", &self.busy)
            .field("fetch_stalled", &self.fetch_stalled)
            .field("fetch_done", &self.fetch_done)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl VectorCore {
    /// Creates a core at reset, ready to fetch line 0 of `program`.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration.
    /// * `program` - Source of instruction lines.
    pub fn new(config: &Config, program: Box<dyn InstructionSource>) -> Self {
        Self {
            program,
            latency: LatencyModel::new(config),
            max_cycles: config.max_cycles,
            pc: 0,
            cycle: 0,
            vector: VectorState::new(),
            srf: RegisterFile::new("SRF", NUM_SCALAR_REGS, 1),
            vrf: RegisterFile::new("VRF", NUM_VECTOR_REGS, MAX_VECTOR_LENGTH),
            busy: BusyBoard::new(),
            queues: IssueQueues::from_config(config),
            resources: ResourceArbiter::new(),
            stats: SimStats::default(),
            fetched: None,
            held: None,
            fetch_stalled: false,
            fetch_done: false,
            state: CoreState::Running,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> &CoreState {
        &self.state
    }

    /// Whether the core has halted.
    pub const fn is_halted(&self) -> bool {
        matches!(self.state, CoreState::Halted(_))
    }

    /// Whether fetch is held this cycle because admission failed.
    pub const fn is_fetch_stalled(&self) -> bool {
        self.fetch_stalled
    }

    /// Whether fetch has reached the end of the program.
    pub const fn is_fetch_done(&self) -> bool {
        self.fetch_done
    }

    /// Decoded instruction waiting to be admitted, if any.
    pub const fn held(&self) -> Option<&Instruction> {
        self.held.as_ref()
    }

    /// Configured cycle bound.
    pub const fn max_cycles(&self) -> u64 {
        self.max_cycles
    }

    /// Replaces the cycle bound.
    pub const fn set_max_cycles(&mut self, max_cycles: u64) {
        self.max_cycles = max_cycles;
    }

    /// Every instruction currently claiming registers: queued or executing.
    pub fn in_flight(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.queues.iter().chain(self.resources.occupants())
    }

    /// Register files for dumping: SRF, VRF, VMR and VLR.
    ///
    /// The mask and length registers are materialized from the live vector state.
    pub fn register_files(&self) -> [RegisterFile; 4] {
        let mut vmr = RegisterFile::new("VMR", 1, MAX_VECTOR_LENGTH);
        let mut vlr = RegisterFile::new("VLR", 1, 1);
        let mask_words = self.vector.mask().to_words();
        let length = i32::try_from(self.vector.length()).unwrap_or(i32::MAX);
        // Both files have exactly one register, so index 0 is always in range.
        let _ = vmr.write(0, &mask_words);
        let _ = vlr.write_word(0, length);
        [self.srf.clone(), self.vrf.clone(), vmr, vlr]
    }
}
