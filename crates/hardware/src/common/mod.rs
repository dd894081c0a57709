//! Common utilities and types used throughout the vector core simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Register counts, vector width, memory sizes, and simulation bounds.
//! 2. **Error Handling:** Decode, admission, configuration, load, and simulation errors.
//! 3. **Register Management:** Typed register indices and word-granular register files.

/// Architecture and simulation constants.
pub mod constants;

/// Error types.
pub mod error;

/// Register indices and register files.
pub mod reg;

pub use constants::{MAX_VECTOR_LENGTH, NUM_SCALAR_REGS, NUM_VECTOR_REGS};
pub use error::{AccessError, AdmitError, ConfigError, DecodeError, LoadError, SimError};
pub use reg::{Reg, RegKind, RegisterFile, ScalarReg, VectorReg};
