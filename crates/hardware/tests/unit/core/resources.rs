//! # Resource Arbiter Tests

use pretty_assertions::assert_eq;
use vcsim_core::core::arch::vector::VectorState;
use vcsim_core::core::pipeline::ResourceArbiter;
use vcsim_core::core::pipeline::resources::Resource;
use vcsim_core::isa::decode::{Decoded, decode};
use vcsim_core::isa::instruction::Instruction;

fn instr(line: &str) -> Instruction {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match decode(&tokens, &mut VectorState::new(), &[0i32; 8]) {
        Ok(Decoded::Instruction(i)) => i,
        other => panic!("unexpected decode result {other:?}"),
    }
}

#[test]
fn test_resource_for_each_family() {
    let cases = [
        ("SUBVS VR1 VR2 SR1", Resource::Adder),
        ("SLTVV VR1 VR2 (1)", Resource::Adder),
        ("MULVV VR1 VR2 VR3", Resource::Multiplier),
        ("DIVVS VR1 VR2 SR1", Resource::Divider),
        ("PACKHI VR1 VR2 VR3", Resource::Shuffle),
        ("SVWS VR1 (0,4)", Resource::Memory),
        ("BNE SR1 SR2", Resource::Scalar),
    ];
    for (line, resource) in cases {
        assert_eq!(Resource::for_instruction(&instr(line)), resource, "{line}");
    }
}

#[test]
fn test_claim_counts_down_and_frees_at_zero() {
    let mut arbiter = ResourceArbiter::new();
    arbiter
        .claim(Resource::Adder, instr("ADDVV VR1 VR2 VR3"), 3)
        .unwrap();
    assert!(arbiter.is_busy(Resource::Adder));
    assert!(arbiter.retire().is_empty());
    assert!(arbiter.retire().is_empty());
    assert_eq!(arbiter.remaining(Resource::Adder), 1);

    let done = arbiter.retire();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].0, Resource::Adder);
    assert!(arbiter.is_idle());
    assert_eq!(arbiter.busy_cycles(Resource::Adder), 3);
}

#[test]
fn test_busy_resource_refuses_claim() {
    let mut arbiter = ResourceArbiter::new();
    arbiter
        .claim(Resource::Memory, instr("LV VR1 (0)"), 2)
        .unwrap();
    let second = instr("SV VR2 (1)");
    assert_eq!(
        arbiter.claim(Resource::Memory, second.clone(), 2),
        Err(second)
    );
    assert_eq!(
        arbiter.occupant(Resource::Memory).map(|i| i.opcode.mnemonic()),
        Some("LV")
    );
}

#[test]
fn test_zero_cycle_claim_frees_on_next_retire() {
    let mut arbiter = ResourceArbiter::new();
    arbiter
        .claim(Resource::Scalar, instr("ADD SR1 SR2 SR3"), 0)
        .unwrap();
    assert_eq!(arbiter.retire().len(), 1);
}

#[test]
fn test_units_run_in_parallel() {
    let mut arbiter = ResourceArbiter::new();
    arbiter
        .claim(Resource::Adder, instr("ADDVV VR1 VR2 VR3"), 1)
        .unwrap();
    arbiter
        .claim(Resource::Divider, instr("DIVVV VR4 VR5 VR6"), 1)
        .unwrap();
    assert_eq!(arbiter.occupants().count(), 2);
    let done: Vec<_> = arbiter.retire().into_iter().map(|(r, _)| r).collect();
    assert_eq!(done, vec![Resource::Adder, Resource::Divider]);
}
