//! Program source trait.
//!
//! This module defines the `InstructionSource` trait the core fetches from. It provides:
//! 1. **Access:** `read` of one pre-tokenized line by program counter.
//! 2. **End of Program:** `None` from `read` is the single end-of-sequence signal.
//!
//! Implementors must be `Send + Sync` so a loaded program can be shared between threads
//! running independent simulations.

/// Ordered, 0-indexed sequence of pre-tokenized instruction lines.
pub trait InstructionSource: Send + Sync {
    /// Returns the tokens of line `pc`, or `None` past the end of the program.
    fn read(&self, pc: usize) -> Option<Vec<String>>;

    /// Number of lines in the program.
    fn len(&self) -> usize;

    /// Whether the program holds no lines.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
