//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, issue classes and operand layouts, and the text
//! decoder that turns a tokenized program line into a scheduled instruction.

/// Text instruction decoding.
pub mod decode;

/// Opcodes, issue classes and decoded instruction records.
pub mod instruction;
