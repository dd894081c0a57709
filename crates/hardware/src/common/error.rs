//! Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Decode Errors:** Failures to turn an instruction line into an `Instruction`.
//! 2. **Admission Errors:** Recoverable refusals at the issue-queue boundary.
//! 3. **Configuration and Load Errors:** Fatal problems detected before the first cycle.
//! 4. **Simulation Errors:** The top-level error surfaced by `Simulator::run`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::reg::{Reg, RegKind};
use crate::isa::instruction::IssueClass;

/// Failure to decode one instruction line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line holds no tokens.
    #[error("empty instruction line")]
    EmptyInstruction,

    /// The mnemonic is not part of the instruction set.
    ///
    /// Halts fetch and decode; the core treats it as the end of the program.
    #[error("unknown instruction `{0}`")]
    UnknownInstruction(String),

    /// A required operand is absent.
    #[error("`{mnemonic}` is missing operand {position}")]
    MissingOperand {
        /// Mnemonic of the offending instruction.
        mnemonic: String,
        /// 1-based operand position.
        position: usize,
    },

    /// A register token is malformed, out of range, or of the wrong kind.
    #[error("`{token}` is not a valid register, expected {}0-{}7", .expected.prefix(), .expected.prefix())]
    InvalidRegister {
        /// The offending token.
        token: String,
        /// Register kind the operand layout requires.
        expected: RegKind,
    },

    /// A bracketed list or one of its elements cannot be parsed.
    #[error("invalid operand `{token}`: {reason}")]
    InvalidOperand {
        /// The offending token.
        token: String,
        /// Short description of what was expected.
        reason: &'static str,
    },

    /// `MTCL` requested a vector length beyond the register width.
    #[error("vector length {length} exceeds the maximum of {max}")]
    VectorLengthOutOfRange {
        /// Requested length.
        length: usize,
        /// Maximum vector length.
        max: usize,
    },
}

/// Reason an instruction could not enter its issue queue this cycle.
///
/// Both variants are recoverable: the front end stalls fetch for one cycle
/// and retries the same instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AdmitError {
    /// The instruction's queue is at its configured depth.
    #[error("{0} queue is full")]
    QueueFull(IssueClass),

    /// A source or destination register is claimed by an in-flight instruction.
    #[error("register {0} is busy")]
    RegisterHazard(Reg),
}

/// Out-of-range access to a data memory or register file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Word address beyond the end of a data memory.
    #[error("{memory}: address {address} out of range (size {size})")]
    AddressOutOfRange {
        /// Name of the memory (e.g. `"VDMEM"`).
        memory: String,
        /// Requested word address.
        address: usize,
        /// Memory size in words.
        size: usize,
    },

    /// Register index beyond the end of a register file.
    #[error("{file}: register index {index} out of range")]
    RegisterOutOfRange {
        /// Name of the register file (e.g. `"SRF"`).
        file: String,
        /// Requested register index.
        index: usize,
    },
}

/// Fatal configuration problem, detected before any cycle runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter is absent.
    #[error("missing required configuration parameter `{0}`")]
    MissingParameter(String),

    /// A parameter is present but unusable.
    #[error("invalid value {value} for `{key}`: {reason}")]
    InvalidValue {
        /// Parameter name.
        key: String,
        /// Offending value.
        value: i64,
        /// Short description of the constraint.
        reason: &'static str,
    },

    /// A line of a `key = value` file is malformed.
    #[error("line {line}: cannot parse `{text}`")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// The configuration file cannot be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The parameters do not deserialize into a `Config`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Fatal problem loading the program or a data-memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A file cannot be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A data-memory line is not an integer word.
    #[error("{}:{line}: cannot parse `{text}` as a word", .path.display())]
    Parse {
        /// Path of the image.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A data-memory image holds more words than the memory.
    #[error("{}: image holds {len} words but the memory holds {capacity}", .path.display())]
    ImageTooLarge {
        /// Path of the image.
        path: PathBuf,
        /// Words in the image.
        len: usize,
        /// Words in the memory.
        capacity: usize,
    },

    /// A literal memory address in the program lies outside its memory.
    #[error("instruction {pc} (`{mnemonic}`) references {memory} address {address} (size {size})")]
    AddressOutOfRange {
        /// Program counter of the instruction.
        pc: usize,
        /// Its mnemonic.
        mnemonic: String,
        /// Name of the addressed memory.
        memory: &'static str,
        /// Offending word address.
        address: usize,
        /// Memory size in words.
        size: usize,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid or incomplete configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Program or memory image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Out-of-range memory or register access.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The core did not halt within the configured cycle bound.
    ///
    /// Indicates a modeling defect such as a resource that never frees.
    #[error("simulation did not drain within {cap} cycles")]
    IterationCapExceeded {
        /// The cycle bound that was hit.
        cap: u64,
    },

    /// An output file cannot be written.
    #[error("cannot write {}: {source}", .path.display())]
    Dump {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
