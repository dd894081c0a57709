//! Vector Length and Mask State.
//!
//! This module holds the live vector control state of the core. It provides:
//! 1. **Mask:** `VectorMask`, a 64-bit per-element enable set.
//! 2. **Live State:** `VectorState`, the vector length register (VLR) and vector mask
//!    register (VMR) as seen by the decoder.
//! 3. **Snapshots:** By-value copies captured into every decoded vector instruction.

use std::fmt;

use crate::common::constants::MAX_VECTOR_LENGTH;
use crate::common::error::DecodeError;

/// Per-element enable bits for one vector operation.
///
/// Bit `i` enables element `i`. Only the low `MAX_VECTOR_LENGTH` bits are used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorMask(u64);

impl VectorMask {
    /// Every element enabled.
    pub const ALL_ONES: Self = Self(u64::MAX);

    /// Every element disabled.
    pub const NONE: Self = Self(0);

    /// Creates a mask from raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Builds a mask from per-element flags; elements past the end are cleared.
    pub fn from_flags<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        let bits = flags
            .into_iter()
            .take(MAX_VECTOR_LENGTH)
            .enumerate()
            .filter(|(_, on)| *on)
            .fold(0u64, |acc, (i, _)| acc | (1 << i));
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether element `idx` is enabled. Elements past the mask width are disabled.
    pub const fn is_set(self, idx: usize) -> bool {
        idx < MAX_VECTOR_LENGTH && (self.0 >> idx) & 1 == 1
    }

    /// Mask as one word per element, as stored in the mask register file.
    pub fn to_words(self) -> Vec<i32> {
        (0..MAX_VECTOR_LENGTH)
            .map(|i| i32::from(self.is_set(i)))
            .collect()
    }
}

impl Default for VectorMask {
    fn default() -> Self {
        Self::ALL_ONES
    }
}

impl fmt::Display for VectorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Vector control state captured by a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorSnapshot {
    /// Vector length in elements.
    pub length: usize,
    /// Element enable mask.
    pub mask: VectorMask,
}

impl Default for VectorSnapshot {
    fn default() -> Self {
        Self {
            length: MAX_VECTOR_LENGTH,
            mask: VectorMask::ALL_ONES,
        }
    }
}

/// Live VLR/VMR state.
///
/// Starts at the maximum vector length with every element enabled. Only
/// `MTCL`, `CVM` and the mask-setting comparisons change it, and they do so
/// while being decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorState {
    current: VectorSnapshot,
}

impl VectorState {
    /// Creates the reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current vector length.
    pub const fn length(&self) -> usize {
        self.current.length
    }

    /// Current vector mask.
    pub const fn mask(&self) -> VectorMask {
        self.current.mask
    }

    /// By-value copy of the current state.
    pub const fn snapshot(&self) -> VectorSnapshot {
        self.current
    }

    /// Sets the vector length.
    ///
    /// # Errors
    ///
    /// Returns `VectorLengthOutOfRange` if `length` exceeds `MAX_VECTOR_LENGTH`;
    /// the state is left unchanged.
    pub fn set_length(&mut self, length: usize) -> Result<(), DecodeError> {
        if length > MAX_VECTOR_LENGTH {
            return Err(DecodeError::VectorLengthOutOfRange {
                length,
                max: MAX_VECTOR_LENGTH,
            });
        }
        self.current.length = length;
        Ok(())
    }

    /// Replaces the vector mask.
    pub fn set_mask(&mut self, mask: VectorMask) {
        self.current.mask = mask;
    }

    /// Enables every element.
    pub fn clear_mask(&mut self) {
        self.current.mask = VectorMask::ALL_ONES;
    }
}
