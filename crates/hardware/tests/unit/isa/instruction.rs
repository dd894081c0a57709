//! # Opcode Classification Tests

use rstest::rstest;
use vcsim_core::isa::instruction::{
    AluOp, Comparison, IssueClass, MemorySpace, Opcode, ShuffleOp, VectorAccess, VectorOp,
};

#[rstest]
#[case(Opcode::VectorVector(VectorOp::Add), Some(IssueClass::VectorCompute))]
#[case(Opcode::SetMaskVS(None), Some(IssueClass::VectorCompute))]
#[case(Opcode::ClearMask, Some(IssueClass::VectorCompute))]
#[case(Opcode::Shuffle(ShuffleOp::PackHi), Some(IssueClass::VectorCompute))]
#[case(Opcode::LoadVector(VectorAccess::Strided), Some(IssueClass::VectorData))]
#[case(Opcode::StoreVector(VectorAccess::Indexed), Some(IssueClass::VectorData))]
#[case(Opcode::Pop, Some(IssueClass::ScalarOps))]
#[case(Opcode::MoveToLength, Some(IssueClass::ScalarOps))]
#[case(Opcode::ScalarAlu(AluOp::Sra), Some(IssueClass::ScalarOps))]
#[case(Opcode::Branch(Comparison::Ge), Some(IssueClass::ScalarOps))]
#[case(Opcode::Halt, None)]
fn test_issue_class(#[case] opcode: Opcode, #[case] class: Option<IssueClass>) {
    assert_eq!(opcode.class(), class);
}

#[test]
fn test_memory_space() {
    assert_eq!(
        Opcode::LoadScalar.memory_space(),
        Some(MemorySpace::Scalar)
    );
    assert_eq!(
        Opcode::StoreVector(VectorAccess::Unit).memory_space(),
        Some(MemorySpace::Vector)
    );
    assert_eq!(Opcode::Pop.memory_space(), None);
    assert_eq!(MemorySpace::Vector.name(), "VDMEM");
}

#[test]
fn test_mnemonic_display() {
    assert_eq!(Opcode::SetMaskVV(Some(Comparison::Le)).to_string(), "SLEVV");
    assert_eq!(Opcode::Shuffle(ShuffleOp::UnpackLo).to_string(), "UNPACKLO");
    assert_eq!(Opcode::from_mnemonic("lvws"), Some(Opcode::LoadVector(VectorAccess::Strided)));
}

#[test]
fn test_class_names() {
    let names: Vec<_> = IssueClass::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["compute", "data", "scalar"]);
}
