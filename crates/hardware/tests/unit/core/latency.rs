//! # Latency Model Tests
//!
//! Compute latency is a closed form over lane occupancy; memory latency is a
//! small bank simulation whose results are checked against hand-traced cases.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use vcsim_core::config::Config;
use vcsim_core::core::arch::vector::{VectorMask, VectorSnapshot};
use vcsim_core::core::pipeline::latency::{BankReport, LatencyModel};
use vcsim_core::isa::instruction::ComputeResource;

fn model(lanes: usize, banks: usize, busy: u64) -> LatencyModel {
    LatencyModel::new(&Config {
        num_lanes: lanes,
        vdm_num_banks: banks,
        vdm_bank_busy_time: busy,
        pipeline_depth_add: 4,
        pipeline_depth_mul: 10,
        pipeline_depth_scalar: 2,
        ..Config::default()
    })
}

fn full(length: usize) -> VectorSnapshot {
    VectorSnapshot {
        length,
        mask: VectorMask::ALL_ONES,
    }
}

// ══════════════════════════════════════════════════════════
// Compute
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(4, 64, ComputeResource::Adder, 4 + 16 - 1)]
#[case(4, 6, ComputeResource::Adder, 4 + 2 - 1)]
#[case(1, 3, ComputeResource::Multiplier, 10 + 3 - 1)]
#[case(64, 64, ComputeResource::Multiplier, 10)]
fn test_compute_latency(
    #[case] lanes: usize,
    #[case] length: usize,
    #[case] resource: ComputeResource,
    #[case] expected: u64,
) {
    assert_eq!(model(lanes, 8, 1).compute_latency(resource, full(length)), expected);
}

#[test]
fn test_single_element_costs_the_configured_depth() {
    let config = Config {
        pipeline_depth_add: 3,
        pipeline_depth_mul: 7,
        pipeline_depth_div: 11,
        pipeline_depth_shuffle: 5,
        ..Config::default()
    };
    let model = LatencyModel::new(&config);
    for resource in [
        ComputeResource::Adder,
        ComputeResource::Multiplier,
        ComputeResource::Divider,
        ComputeResource::Shuffle,
    ] {
        assert_eq!(
            model.compute_latency(resource, full(1)),
            config.pipeline_depth(resource),
            "{resource}"
        );
    }
}

#[test]
fn test_masked_lane_is_not_the_busiest() {
    let m = model(2, 8, 1);
    // Elements 0..4 over two lanes; only lane 1's elements are enabled.
    let snap = VectorSnapshot {
        length: 4,
        mask: VectorMask::from_flags([false, true, false, true]),
    };
    assert_eq!(m.lane_occupancy(snap), vec![0, 2]);
    assert_eq!(m.compute_latency(ComputeResource::Adder, snap), 4 + 2 - 1);
}

#[test]
fn test_fully_masked_vector_costs_depth_minus_one() {
    let snap = VectorSnapshot {
        length: 64,
        mask: VectorMask::NONE,
    };
    assert_eq!(model(4, 8, 1).compute_latency(ComputeResource::Adder, snap), 3);
}

#[test]
fn test_scalar_latency_is_configured_depth() {
    assert_eq!(model(4, 8, 1).scalar_latency(), 2);
}

// ══════════════════════════════════════════════════════════
// Banked memory
// ══════════════════════════════════════════════════════════

#[test]
fn test_same_bank_conflicts() {
    assert_eq!(
        model(1, 4, 3).memory_latency(&[0, 4]),
        BankReport {
            cycles: 7,
            conflict_stalls: 2
        }
    );
}

#[test]
fn test_distinct_banks_overlap() {
    assert_eq!(
        model(1, 4, 3).memory_latency(&[0, 1]),
        BankReport {
            cycles: 5,
            conflict_stalls: 0
        }
    );
}

#[test]
fn test_lanes_issue_in_the_same_cycle() {
    // Two lanes, two banks: both addresses start in cycle 1.
    assert_eq!(
        model(2, 2, 3).memory_latency(&[0, 1]),
        BankReport {
            cycles: 4,
            conflict_stalls: 0
        }
    );
}

#[test]
fn test_lower_lane_wins_a_bank_tie() {
    // Both lanes want bank 0; lane 1 waits for lane 0's access to finish.
    assert_eq!(
        model(2, 4, 2).memory_latency(&[0, 4]),
        BankReport {
            cycles: 5,
            conflict_stalls: 2
        }
    );
}

#[test]
fn test_empty_access_takes_no_cycles() {
    assert_eq!(model(4, 4, 3).memory_latency(&[]), BankReport::default());
}

proptest! {
    #[test]
    fn prop_memory_latency_is_deterministic(
        addrs in prop::collection::vec(0usize..512, 0..64),
        lanes in 1usize..8,
        banks in 1usize..16,
        busy in 1u64..5,
    ) {
        let m = model(lanes, banks, busy);
        prop_assert_eq!(m.memory_latency(&addrs), m.memory_latency(&addrs));
    }

    #[test]
    fn prop_memory_latency_lower_bound(
        addrs in prop::collection::vec(0usize..512, 1..64),
        lanes in 1usize..8,
        banks in 1usize..16,
        busy in 1u64..5,
    ) {
        let report = model(lanes, banks, busy).memory_latency(&addrs);
        let issue_cycles = addrs.len().div_ceil(lanes) as u64;
        prop_assert!(report.cycles >= issue_cycles + busy);
    }

    #[test]
    fn prop_full_vector_compute_closed_form(
        lanes in 1usize..=64,
        length in 1usize..=64,
    ) {
        let m = model(lanes, 8, 1);
        let expected = 4 + length.div_ceil(lanes) as u64 - 1;
        prop_assert_eq!(m.compute_latency(ComputeResource::Adder, full(length)), expected);
    }
}
