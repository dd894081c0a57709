//! Instruction memory.
//!
//! Holds the program as a list of token vectors. Comments (`#` to end of line)
//! and blank lines are dropped when the text is parsed, so program counters
//! index only real instructions.

use crate::soc::traits::InstructionSource;

/// In-memory program image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionMemory {
    lines: Vec<Vec<String>>,
}

impl InstructionMemory {
    /// Creates an image from already tokenized lines. Empty lines are kept.
    pub const fn new(lines: Vec<Vec<String>>) -> Self {
        Self { lines }
    }

    /// Parses program text.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcsim_core::soc::imem::InstructionMemory;
    /// use vcsim_core::soc::traits::InstructionSource;
    ///
    /// let imem = InstructionMemory::parse("# setup\nCVM\n\nLV VR1 (0,1)  # load\n");
    /// assert_eq!(imem.len(), 2);
    /// assert_eq!(imem.read(1), Some(vec!["LV".into(), "VR1".into(), "(0,1)".into()]));
    /// assert_eq!(imem.read(2), None);
    /// ```
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .map(|code| {
                code.split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { lines }
    }

    /// Every line, in program order.
    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }
}

impl InstructionSource for InstructionMemory {
    fn read(&self, pc: usize) -> Option<Vec<String>> {
        self.lines.get(pc).cloned()
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}
