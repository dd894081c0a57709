//! Register Indices and Register Files.
//!
//! This module provides the register-level building blocks of the vector core. It provides:
//! 1. **Typed Indices:** `ScalarReg` and `VectorReg` newtypes so that scalar index 3 and
//!    vector index 3 can never be confused.
//! 2. **Register Kinds:** `RegKind` and the kind-tagged `Reg` used in hazard reports.
//! 3. **Storage:** `RegisterFile`, a word-granular register bank with text dumps.

use std::fmt;
use std::io::{self, Write};

use super::constants::{DUMP_COLUMN_WIDTH, NUM_SCALAR_REGS, NUM_VECTOR_REGS};
use super::error::AccessError;

/// The two architectural register kinds tracked by the busy-board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegKind {
    /// Scalar registers (`SR0`-`SR7`), one word each.
    Scalar,
    /// Vector registers (`VR0`-`VR7`), one word per element.
    Vector,
}

impl RegKind {
    /// Number of architectural registers of this kind.
    pub const fn count(self) -> usize {
        match self {
            Self::Scalar => NUM_SCALAR_REGS,
            Self::Vector => NUM_VECTOR_REGS,
        }
    }

    /// Assembly prefix used for registers of this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Scalar => "SR",
            Self::Vector => "VR",
        }
    }
}

/// Index of a scalar register, guaranteed to be in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScalarReg(u8);

impl ScalarReg {
    /// Returns the register for `idx`, or `None` if `idx >= NUM_SCALAR_REGS`.
    pub const fn new(idx: usize) -> Option<Self> {
        if idx < NUM_SCALAR_REGS {
            Some(Self(idx as u8))
        } else {
            None
        }
    }

    /// Raw register index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over every scalar register in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SCALAR_REGS).map(|i| Self(i as u8))
    }
}

impl fmt::Display for ScalarReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SR{}", self.0)
    }
}

/// Index of a vector register, guaranteed to be in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorReg(u8);

impl VectorReg {
    /// Returns the register for `idx`, or `None` if `idx >= NUM_VECTOR_REGS`.
    pub const fn new(idx: usize) -> Option<Self> {
        if idx < NUM_VECTOR_REGS {
            Some(Self(idx as u8))
        } else {
            None
        }
    }

    /// Raw register index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over every vector register in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_VECTOR_REGS).map(|i| Self(i as u8))
    }
}

impl fmt::Display for VectorReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VR{}", self.0)
    }
}

/// A register of either kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reg {
    /// A scalar register.
    Scalar(ScalarReg),
    /// A vector register.
    Vector(VectorReg),
}

impl Reg {
    /// Kind of this register.
    pub const fn kind(self) -> RegKind {
        match self {
            Self::Scalar(_) => RegKind::Scalar,
            Self::Vector(_) => RegKind::Vector,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(r) => r.fmt(f),
            Self::Vector(r) => r.fmt(f),
        }
    }
}

/// A bank of `count` registers, each `width` 32-bit words wide.
///
/// Used for the scalar file (8 × 1), the vector file (8 × 64), the mask
/// register (1 × 64) and the length register (1 × 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    name: String,
    width: usize,
    regs: Vec<Vec<i32>>,
}

impl RegisterFile {
    /// Creates a zero-initialised register file.
    ///
    /// # Arguments
    ///
    /// * `name` - Name used in error messages and as the dump file stem (e.g. `"VRF"`).
    /// * `count` - Number of registers.
    /// * `width` - Number of words per register.
    pub fn new(name: impl Into<String>, count: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
            regs: vec![vec![0; width]; count],
        }
    }

    /// Name of this register file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registers.
    pub fn count(&self) -> usize {
        self.regs.len()
    }

    /// Number of words per register.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Reads a whole register.
    pub fn read(&self, idx: usize) -> Result<&[i32], AccessError> {
        self.regs
            .get(idx)
            .map(Vec::as_slice)
            .ok_or_else(|| self.out_of_range(idx))
    }

    /// Reads word 0 of a register; the natural accessor for scalar files.
    pub fn read_word(&self, idx: usize) -> Result<i32, AccessError> {
        self.read(idx).map(|r| r.first().copied().unwrap_or(0))
    }

    /// Overwrites the leading words of a register with `values`.
    ///
    /// Values past the register width are ignored; words past `values.len()`
    /// keep their previous contents.
    pub fn write(&mut self, idx: usize, values: &[i32]) -> Result<(), AccessError> {
        let err = self.out_of_range(idx);
        let reg = self.regs.get_mut(idx).ok_or(err)?;
        for (slot, val) in reg.iter_mut().zip(values) {
            *slot = *val;
        }
        Ok(())
    }

    /// Writes word 0 of a register.
    pub fn write_word(&mut self, idx: usize, val: i32) -> Result<(), AccessError> {
        self.write(idx, &[val])
    }

    /// Writes the register file as a text table.
    ///
    /// The first line lists element indices, the second is a dashed rule, and each
    /// following line holds one register. Every cell is left-aligned in a fixed column.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let w = DUMP_COLUMN_WIDTH;
        for i in 0..self.width {
            write!(out, "{i:<w$}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", "-".repeat(self.width * w))?;
        for reg in &self.regs {
            for val in reg {
                write!(out, "{val:<w$}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> AccessError {
        AccessError::RegisterOutOfRange {
            file: self.name.clone(),
            index,
        }
    }
}
