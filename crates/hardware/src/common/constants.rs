//! Global Simulator Constants.
//!
//! This module defines architecture-wide constants used across the simulator. It includes:
//! 1. **Register Constants:** Register counts per register kind.
//! 2. **Vector Constants:** Maximum vector length and mask width.
//! 3. **Memory Constants:** Address widths of the scalar and vector data memories.
//! 4. **Simulation Constants:** Safety bounds for the cycle loop.

/// Number of scalar registers (`SR0`-`SR7`).
pub const NUM_SCALAR_REGS: usize = 8;

/// Number of vector registers (`VR0`-`VR7`).
pub const NUM_VECTOR_REGS: usize = 8;

/// Maximum vector length (MVL): elements per vector register and bits in the mask register.
pub const MAX_VECTOR_LENGTH: usize = 64;

/// Address width of the scalar data memory in words (2^13 words = 32 KiB).
pub const SDMEM_ADDRESS_BITS: u32 = 13;

/// Address width of the vector data memory in words (2^17 words = 512 KiB).
pub const VDMEM_ADDRESS_BITS: u32 = 17;

/// Default hard bound on simulated cycles before the core gives up.
pub const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

/// Column width used when dumping register files to text.
pub const DUMP_COLUMN_WIDTH: usize = 13;
