//! Instruction Set and Decoded Instruction Record.
//!
//! This module defines the vocabulary shared by the decoder and the pipeline. It provides:
//! 1. **Classification:** `IssueClass` (which queue) and `ComputeResource` (which vector unit).
//! 2. **Opcodes:** The closed `Opcode` enumeration with its mnemonic table and operand layouts.
//! 3. **Records:** `Instruction`, the immutable result of decoding one line.

use std::fmt;

use crate::common::reg::{Reg, ScalarReg, VectorReg};
use crate::core::arch::vector::VectorSnapshot;

/// Issue queue an instruction is admitted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueClass {
    /// Vector arithmetic, comparison and shuffle operations.
    VectorCompute,
    /// Vector loads and stores.
    VectorData,
    /// Scalar operations, including scalar memory and branches.
    ScalarOps,
}

impl IssueClass {
    /// Every class, in queue index order.
    pub const ALL: [Self; 3] = [Self::VectorCompute, Self::VectorData, Self::ScalarOps];

    /// Position of the class in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            Self::VectorCompute => 0,
            Self::VectorData => 1,
            Self::ScalarOps => 2,
        }
    }

    /// Short name used in logs and statistics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::VectorCompute => "compute",
            Self::VectorData => "data",
            Self::ScalarOps => "scalar",
        }
    }
}

impl fmt::Display for IssueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vector functional unit used by a compute-class instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComputeResource {
    /// Add, subtract, compare and mask operations.
    Adder,
    /// Multiplication.
    Multiplier,
    /// Division.
    Divider,
    /// Pack and unpack.
    Shuffle,
}

impl fmt::Display for ComputeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Adder => "adder",
            Self::Multiplier => "multiplier",
            Self::Divider => "divider",
            Self::Shuffle => "shuffle",
        })
    }
}

/// Comparison performed by mask-setting and branch instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Ge,
    /// Less than or equal.
    Le,
}

/// Addressing mode of a vector load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorAccess {
    /// Unit stride (`LV`, `SV`).
    Unit,
    /// Indexed gather/scatter (`LVI`, `SVI`).
    Indexed,
    /// Constant stride (`LVWS`, `SVWS`).
    Strided,
}

/// Scalar ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Logical shift left.
    Sll,
    /// Logical shift right.
    Srl,
    /// Arithmetic shift right.
    Sra,
}

/// Vector arithmetic operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorOp {
    /// Element-wise addition.
    Add,
    /// Element-wise subtraction.
    Sub,
    /// Element-wise multiplication.
    Mul,
    /// Element-wise division.
    Div,
}

/// Shuffle operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShuffleOp {
    /// Interleave the low halves.
    UnpackLo,
    /// Interleave the high halves.
    UnpackHi,
    /// Gather even elements into the low half.
    PackLo,
    /// Gather even elements into the high half.
    PackHi,
}

/// Every operation the core understands.
///
/// `None` in a comparison slot is the generic `SVV`/`SVS` form, whose
/// condition is implied by the mask operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Vector-vector arithmetic.
    VectorVector(VectorOp),
    /// Vector-scalar arithmetic.
    VectorScalar(VectorOp),
    /// Vector-vector comparison setting the mask.
    SetMaskVV(Option<Comparison>),
    /// Vector-scalar comparison setting the mask.
    SetMaskVS(Option<Comparison>),
    /// Enable every mask bit.
    ClearMask,
    /// Shuffle unit operation.
    Shuffle(ShuffleOp),
    /// Vector load.
    LoadVector(VectorAccess),
    /// Vector store.
    StoreVector(VectorAccess),
    /// Population count of the mask register into a scalar register.
    Pop,
    /// Move the vector length into a scalar register.
    MoveFromLength,
    /// Move a scalar register into the vector length.
    MoveToLength,
    /// Scalar load.
    LoadScalar,
    /// Scalar store.
    StoreScalar,
    /// Scalar register-register operation.
    ScalarAlu(AluOp),
    /// Unconditional branch.
    Jump,
    /// Conditional branch.
    Branch(Comparison),
    /// End of program.
    Halt,
}

/// Data memory targeted by a load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemorySpace {
    /// Scalar data memory (SDMEM).
    Scalar,
    /// Vector data memory (VDMEM).
    Vector,
}

impl MemorySpace {
    /// Name of the memory, also the stem of its image files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SDMEM",
            Self::Vector => "VDMEM",
        }
    }
}

/// Operand shape of an opcode, after the mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `VRd VRs VRt`.
    VectorVector,
    /// `VRd VRs SRt`.
    VectorScalar,
    /// `VRs VRt (mask)`.
    CompareVV,
    /// `VRs SRt (mask)`.
    CompareVS,
    /// `VRd (addrs)`.
    VectorLoad,
    /// `VRs (addrs)`.
    VectorStore,
    /// `SRd`.
    ScalarDest,
    /// `SRs (length)`.
    LengthSource,
    /// `SRd (addr)`.
    ScalarLoad,
    /// `SRs (addr)`.
    ScalarStore,
    /// `SRd SRs SRt`.
    ScalarAlu,
    /// `SRs SRt [(target)]`.
    Branch,
    /// No operands.
    Empty,
}

/// Mnemonic table. Each opcode appears exactly once.
const MNEMONICS: &[(&str, Opcode)] = &[
    ("ADDVV", Opcode::VectorVector(VectorOp::Add)),
    ("SUBVV", Opcode::VectorVector(VectorOp::Sub)),
    ("MULVV", Opcode::VectorVector(VectorOp::Mul)),
    ("DIVVV", Opcode::VectorVector(VectorOp::Div)),
    ("ADDVS", Opcode::VectorScalar(VectorOp::Add)),
    ("SUBVS", Opcode::VectorScalar(VectorOp::Sub)),
    ("MULVS", Opcode::VectorScalar(VectorOp::Mul)),
    ("DIVVS", Opcode::VectorScalar(VectorOp::Div)),
    ("SVV", Opcode::SetMaskVV(None)),
    ("SEQVV", Opcode::SetMaskVV(Some(Comparison::Eq))),
    ("SNEVV", Opcode::SetMaskVV(Some(Comparison::Ne))),
    ("SGTVV", Opcode::SetMaskVV(Some(Comparison::Gt))),
    ("SLTVV", Opcode::SetMaskVV(Some(Comparison::Lt))),
    ("SGEVV", Opcode::SetMaskVV(Some(Comparison::Ge))),
    ("SLEVV", Opcode::SetMaskVV(Some(Comparison::Le))),
    ("SVS", Opcode::SetMaskVS(None)),
    ("SEQVS", Opcode::SetMaskVS(Some(Comparison::Eq))),
    ("SNEVS", Opcode::SetMaskVS(Some(Comparison::Ne))),
    ("SGTVS", Opcode::SetMaskVS(Some(Comparison::Gt))),
    ("SLTVS", Opcode::SetMaskVS(Some(Comparison::Lt))),
    ("SGEVS", Opcode::SetMaskVS(Some(Comparison::Ge))),
    ("SLEVS", Opcode::SetMaskVS(Some(Comparison::Le))),
    ("CVM", Opcode::ClearMask),
    ("UNPACKLO", Opcode::Shuffle(ShuffleOp::UnpackLo)),
    ("UNPACKHI", Opcode::Shuffle(ShuffleOp::UnpackHi)),
    ("PACKLO", Opcode::Shuffle(ShuffleOp::PackLo)),
    ("PACKHI", Opcode::Shuffle(ShuffleOp::PackHi)),
    ("LV", Opcode::LoadVector(VectorAccess::Unit)),
    ("LVI", Opcode::LoadVector(VectorAccess::Indexed)),
    ("LVWS", Opcode::LoadVector(VectorAccess::Strided)),
    ("SV", Opcode::StoreVector(VectorAccess::Unit)),
    ("SVI", Opcode::StoreVector(VectorAccess::Indexed)),
    ("SVWS", Opcode::StoreVector(VectorAccess::Strided)),
    ("POP", Opcode::Pop),
    ("MFCL", Opcode::MoveFromLength),
    ("MTCL", Opcode::MoveToLength),
    ("LS", Opcode::LoadScalar),
    ("SS", Opcode::StoreScalar),
    ("ADD", Opcode::ScalarAlu(AluOp::Add)),
    ("SUB", Opcode::ScalarAlu(AluOp::Sub)),
    ("AND", Opcode::ScalarAlu(AluOp::And)),
    ("OR", Opcode::ScalarAlu(AluOp::Or)),
    ("XOR", Opcode::ScalarAlu(AluOp::Xor)),
    ("SLL", Opcode::ScalarAlu(AluOp::Sll)),
    ("SRL", Opcode::ScalarAlu(AluOp::Srl)),
    ("SRA", Opcode::ScalarAlu(AluOp::Sra)),
    ("B", Opcode::Jump),
    ("BEQ", Opcode::Branch(Comparison::Eq)),
    ("BNE", Opcode::Branch(Comparison::Ne)),
    ("BGT", Opcode::Branch(Comparison::Gt)),
    ("BLT", Opcode::Branch(Comparison::Lt)),
    ("BGE", Opcode::Branch(Comparison::Ge)),
    ("BLE", Opcode::Branch(Comparison::Le)),
    ("HALT", Opcode::Halt),
];

impl Opcode {
    /// Looks up a mnemonic, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcsim_core::isa::instruction::{Opcode, VectorOp};
    ///
    /// assert_eq!(Opcode::from_mnemonic("mulvv"), Some(Opcode::VectorVector(VectorOp::Mul)));
    /// assert_eq!(Opcode::from_mnemonic("FMA"), None);
    /// ```
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        MNEMONICS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(mnemonic))
            .map(|(_, op)| *op)
    }

    /// Canonical upper-case mnemonic.
    pub fn mnemonic(self) -> &'static str {
        MNEMONICS
            .iter()
            .find(|(_, op)| *op == self)
            .map_or("?", |(name, _)| name)
    }

    /// Issue queue the opcode goes to; `None` for `HALT`, which is never enqueued.
    pub const fn class(self) -> Option<IssueClass> {
        match self {
            Self::VectorVector(_)
            | Self::VectorScalar(_)
            | Self::SetMaskVV(_)
            | Self::SetMaskVS(_)
            | Self::ClearMask
            | Self::Shuffle(_) => Some(IssueClass::VectorCompute),
            Self::LoadVector(_) | Self::StoreVector(_) => Some(IssueClass::VectorData),
            Self::Pop
            | Self::MoveFromLength
            | Self::MoveToLength
            | Self::LoadScalar
            | Self::StoreScalar
            | Self::ScalarAlu(_)
            | Self::Jump
            | Self::Branch(_) => Some(IssueClass::ScalarOps),
            Self::Halt => None,
        }
    }

    /// Vector unit a compute-class opcode occupies.
    pub const fn resource(self) -> Option<ComputeResource> {
        match self {
            Self::VectorVector(op) | Self::VectorScalar(op) => Some(match op {
                VectorOp::Add | VectorOp::Sub => ComputeResource::Adder,
                VectorOp::Mul => ComputeResource::Multiplier,
                VectorOp::Div => ComputeResource::Divider,
            }),
            Self::SetMaskVV(_) | Self::SetMaskVS(_) | Self::ClearMask => {
                Some(ComputeResource::Adder)
            }
            Self::Shuffle(_) => Some(ComputeResource::Shuffle),
            _ => None,
        }
    }

    /// Operand shape following the mnemonic.
    pub const fn layout(self) -> Layout {
        match self {
            Self::VectorVector(_) | Self::Shuffle(_) => Layout::VectorVector,
            Self::VectorScalar(_) => Layout::VectorScalar,
            Self::SetMaskVV(_) => Layout::CompareVV,
            Self::SetMaskVS(_) => Layout::CompareVS,
            Self::LoadVector(_) => Layout::VectorLoad,
            Self::StoreVector(_) => Layout::VectorStore,
            Self::Pop | Self::MoveFromLength => Layout::ScalarDest,
            Self::MoveToLength => Layout::LengthSource,
            Self::LoadScalar => Layout::ScalarLoad,
            Self::StoreScalar => Layout::ScalarStore,
            Self::ScalarAlu(_) => Layout::ScalarAlu,
            Self::Branch(_) => Layout::Branch,
            Self::ClearMask | Self::Jump | Self::Halt => Layout::Empty,
        }
    }

    /// Data memory addressed by the bracketed operand, if any.
    pub const fn memory_space(self) -> Option<MemorySpace> {
        match self {
            Self::LoadVector(_) | Self::StoreVector(_) => Some(MemorySpace::Vector),
            Self::LoadScalar | Self::StoreScalar => Some(MemorySpace::Scalar),
            _ => None,
        }
    }

    /// Whether a decoded instruction of this opcode carries a vector snapshot.
    pub const fn is_vector(self) -> bool {
        matches!(
            self.class(),
            Some(IssueClass::VectorCompute | IssueClass::VectorData)
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Registers of both kinds touched by one side of an instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegSet {
    /// Scalar registers.
    pub scalar: Vec<ScalarReg>,
    /// Vector registers.
    pub vector: Vec<VectorReg>,
}

impl RegSet {
    /// Adds a register, ignoring duplicates.
    pub fn insert(&mut self, reg: Reg) {
        match reg {
            Reg::Scalar(r) if !self.scalar.contains(&r) => self.scalar.push(r),
            Reg::Vector(r) if !self.vector.contains(&r) => self.vector.push(r),
            _ => {}
        }
    }

    /// Every register in the set, scalars first.
    pub fn iter(&self) -> impl Iterator<Item = Reg> + '_ {
        self.scalar
            .iter()
            .copied()
            .map(Reg::Scalar)
            .chain(self.vector.iter().copied().map(Reg::Vector))
    }

    /// Whether the set holds no registers.
    pub fn is_empty(&self) -> bool {
        self.scalar.is_empty() && self.vector.is_empty()
    }

    /// Whether the set holds `reg`.
    pub fn contains(&self, reg: Reg) -> bool {
        match reg {
            Reg::Scalar(r) => self.scalar.contains(&r),
            Reg::Vector(r) => self.vector.contains(&r),
        }
    }
}

/// A decoded instruction.
///
/// Built once by the decoder and never mutated afterwards; the vector snapshot
/// is a copy, so later `MTCL`/`CVM`/`SVV` decodes cannot change it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Queue the instruction is admitted to.
    pub class: IssueClass,
    /// Vector unit for compute-class instructions.
    pub resource: Option<ComputeResource>,
    /// Registers read.
    pub src: RegSet,
    /// Registers written.
    pub dst: RegSet,
    /// Resolved scalar memory addresses.
    pub scalar_addrs: Vec<usize>,
    /// Resolved vector memory addresses, at most `snapshot.length` entries.
    pub vector_addrs: Vec<usize>,
    /// VLR/VMR as they were when decoding began; `None` for scalar instructions.
    pub snapshot: Option<VectorSnapshot>,
}

impl Instruction {
    /// Every register the instruction claims on the busy-board.
    pub fn regs(&self) -> impl Iterator<Item = Reg> + '_ {
        self.src.iter().chain(self.dst.iter())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for reg in self.dst.iter() {
            write!(f, " {reg}")?;
        }
        for reg in self.src.iter() {
            write!(f, " {reg}")?;
        }
        if !self.scalar_addrs.is_empty() {
            write!(f, " @{:?}", self.scalar_addrs)?;
        }
        if !self.vector_addrs.is_empty() {
            write!(f, " @[{} addrs]", self.vector_addrs.len())?;
        }
        if let Some(snap) = self.snapshot {
            write!(f, " vl={} vm={}", snap.length, snap.mask)?;
        }
        Ok(())
    }
}
