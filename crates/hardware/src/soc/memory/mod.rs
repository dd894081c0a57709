//! Word-addressable data memory.
//!
//! This module implements the scalar and vector data memories. It provides:
//! 1. **Storage:** A flat array of 32-bit words sized by an address width.
//! 2. **Access:** Bounds-checked word reads and writes.
//! 3. **Images:** Loading from a word list (zero-padded) and dumping one word per line.

use std::io::{self, Write};

use crate::common::error::AccessError;

/// Flat word-addressable memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    name: String,
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `2^address_bits` words.
    ///
    /// # Arguments
    ///
    /// * `name` - Memory name, also the stem of its image files (e.g. `"VDMEM"`).
    /// * `address_bits` - Width of a word address.
    pub fn new(name: impl Into<String>, address_bits: u32) -> Self {
        Self {
            name: name.into(),
            words: vec![0; 1usize << address_bits],
        }
    }

    /// Name of this memory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in words.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Whether `address` is a valid word address.
    pub fn contains(&self, address: usize) -> bool {
        address < self.words.len()
    }

    /// Every word, in address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Reads the word at `address`.
    pub fn read(&self, address: usize) -> Result<i32, AccessError> {
        self.words
            .get(address)
            .copied()
            .ok_or_else(|| self.out_of_range(address))
    }

    /// Writes the word at `address`.
    pub fn write(&mut self, address: usize, value: i32) -> Result<(), AccessError> {
        let err = self.out_of_range(address);
        let slot = self.words.get_mut(address).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    /// Copies `image` to the start of memory; the remainder is zeroed.
    ///
    /// Fails without modifying the memory if the image is larger than it.
    pub fn load(&mut self, image: &[i32]) -> Result<(), AccessError> {
        if image.len() > self.words.len() {
            return Err(self.out_of_range(image.len() - 1));
        }
        let (head, tail) = self.words.split_at_mut(image.len());
        head.copy_from_slice(image);
        tail.fill(0);
        Ok(())
    }

    /// Writes every word, one decimal value per line.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for word in &self.words {
            writeln!(out, "{word}")?;
        }
        Ok(())
    }

    fn out_of_range(&self, address: usize) -> AccessError {
        AccessError::AddressOutOfRange {
            memory: self.name.clone(),
            address,
            size: self.words.len(),
        }
    }
}
