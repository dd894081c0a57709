//! # Issue Queue Tests

use pretty_assertions::assert_eq;
use vcsim_core::common::error::AdmitError;
use vcsim_core::config::Config;
use vcsim_core::core::arch::vector::VectorState;
use vcsim_core::core::pipeline::IssueQueues;
use vcsim_core::isa::decode::{Decoded, decode};
use vcsim_core::isa::instruction::{Instruction, IssueClass};

fn instr(line: &str) -> Instruction {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match decode(&tokens, &mut VectorState::new(), &[0i32; 8]) {
        Ok(Decoded::Instruction(i)) => i,
        other => panic!("unexpected decode result {other:?}"),
    }
}

#[test]
fn test_fifo_order_within_class() {
    let mut queues = IssueQueues::new([4, 4, 4]);
    for line in ["ADDVV VR1 VR2 VR3", "MULVV VR4 VR5 VR6", "CVM"] {
        queues.enqueue(instr(line)).unwrap();
    }
    let order: Vec<_> = std::iter::from_fn(|| queues.dequeue(IssueClass::VectorCompute))
        .map(|i| i.opcode.mnemonic())
        .collect();
    assert_eq!(order, vec!["ADDVV", "MULVV", "CVM"]);
}

#[test]
fn test_classes_are_independent() {
    let mut queues = IssueQueues::new([1, 1, 1]);
    queues.enqueue(instr("ADDVV VR1 VR2 VR3")).unwrap();
    queues.enqueue(instr("LV VR4 (0)")).unwrap();
    queues.enqueue(instr("ADD SR1 SR2 SR3")).unwrap();
    for class in IssueClass::ALL {
        assert_eq!(queues.len(class), 1);
        assert!(!queues.has_room(class));
    }
    assert_eq!(
        queues.peek(IssueClass::VectorData).map(|i| i.opcode.mnemonic()),
        Some("LV")
    );
}

#[test]
fn test_full_queue_hands_instruction_back() {
    let mut queues = IssueQueues::new([1, 2, 2]);
    queues.enqueue(instr("ADDVV VR1 VR2 VR3")).unwrap();
    let rejected = instr("DIVVV VR4 VR5 VR6");
    let refused = queues.enqueue(rejected.clone()).unwrap_err();
    assert_eq!(refused.instr, rejected);
    assert_eq!(refused.error(), AdmitError::QueueFull(IssueClass::VectorCompute));
    assert_eq!(queues.len(IssueClass::VectorCompute), 1);
}

#[test]
fn test_scalar_depth_defaults_to_compute_depth() {
    let config = Config {
        compute_queue_depth: 3,
        data_queue_depth: 5,
        scalar_queue_depth: None,
        ..Config::default()
    };
    let queues = IssueQueues::from_config(&config);
    assert_eq!(queues.capacity(IssueClass::VectorCompute), 3);
    assert_eq!(queues.capacity(IssueClass::VectorData), 5);
    assert_eq!(queues.capacity(IssueClass::ScalarOps), 3);
    assert!(queues.is_empty());
}
