//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memories around the vector core: the instruction
//! memory the core fetches from and the scalar and vector data memories.

/// Instruction memory holding the tokenized program.
pub mod imem;

/// Word-addressable data memories.
pub mod memory;

/// Program source trait.
pub mod traits;

use crate::common::constants::{SDMEM_ADDRESS_BITS, VDMEM_ADDRESS_BITS};
use crate::isa::instruction::MemorySpace;

pub use imem::InstructionMemory;
pub use memory::DataMemory;
pub use traits::InstructionSource;

/// Data memories attached to the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct System {
    /// Scalar data memory.
    pub sdmem: DataMemory,
    /// Vector data memory.
    pub vdmem: DataMemory,
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    /// Creates zero-filled memories of the architectural sizes.
    pub fn new() -> Self {
        Self {
            sdmem: DataMemory::new(MemorySpace::Scalar.name(), SDMEM_ADDRESS_BITS),
            vdmem: DataMemory::new(MemorySpace::Vector.name(), VDMEM_ADDRESS_BITS),
        }
    }

    /// The memory backing `space`.
    pub const fn memory(&self, space: MemorySpace) -> &DataMemory {
        match space {
            MemorySpace::Scalar => &self.sdmem,
            MemorySpace::Vector => &self.vdmem,
        }
    }
}
