//! Register busy-board for hazard tracking.
//!
//! One busy flag per architectural register, kept in separate banks per
//! register kind. A register is busy while any in-flight instruction (queued,
//! dispatched or executing) names it as a source or destination. Sources and
//! destinations are treated alike, so RAW, WAR and WAW hazards all fold into
//! the same bit.

use crate::common::constants::{NUM_SCALAR_REGS, NUM_VECTOR_REGS};
use crate::common::error::AdmitError;
use crate::common::reg::{Reg, ScalarReg, VectorReg};
use crate::isa::instruction::Instruction;

/// Per-register busy flags, indexed by typed register newtypes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusyBoard {
    scalar: [bool; NUM_SCALAR_REGS],
    vector: [bool; NUM_VECTOR_REGS],
}

impl BusyBoard {
    /// Create a busy-board with every register free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `reg` is claimed by an in-flight instruction.
    pub fn is_busy(&self, reg: Reg) -> bool {
        match reg {
            Reg::Scalar(r) => self.scalar[r.index()],
            Reg::Vector(r) => self.vector[r.index()],
        }
    }

    /// Check that none of the instruction's registers is busy.
    ///
    /// Reports the first busy register found, scalars before vectors.
    pub fn check(&self, instr: &Instruction) -> Result<(), AdmitError> {
        instr
            .regs()
            .find(|reg| self.is_busy(*reg))
            .map_or(Ok(()), |reg| Err(AdmitError::RegisterHazard(reg)))
    }

    /// Mark every register of `instr` busy. Marking a busy register again is a no-op.
    pub fn mark_busy(&mut self, instr: &Instruction) {
        for reg in instr.regs() {
            self.set(reg, true);
        }
    }

    /// Free every register of `instr`.
    pub fn clear_busy(&mut self, instr: &Instruction) {
        for reg in instr.regs() {
            self.set(reg, false);
        }
    }

    /// Scalar registers currently busy.
    pub fn busy_scalars(&self) -> impl Iterator<Item = ScalarReg> + '_ {
        ScalarReg::all().filter(|r| self.scalar[r.index()])
    }

    /// Vector registers currently busy.
    pub fn busy_vectors(&self) -> impl Iterator<Item = VectorReg> + '_ {
        VectorReg::all().filter(|r| self.vector[r.index()])
    }

    /// Whether no register is busy.
    pub fn is_clear(&self) -> bool {
        !self.scalar.iter().chain(&self.vector).any(|b| *b)
    }

    fn set(&mut self, reg: Reg, busy: bool) {
        match reg {
            Reg::Scalar(r) => self.scalar[r.index()] = busy,
            Reg::Vector(r) => self.vector[r.index()] = busy,
        }
    }
}
