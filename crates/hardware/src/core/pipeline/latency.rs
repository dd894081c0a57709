//! Execution latency model.
//!
//! This module decides how many cycles a dispatched instruction occupies its
//! resource. It provides:
//! 1. **Compute Latency:** A closed form, pipeline depth plus the busiest lane's
//!    element count minus one.
//! 2. **Memory Latency:** A cycle-by-cycle simulation of lanes feeding addresses
//!    into a banked vector memory, where a busy bank blocks the lane waiting on it.
//! 3. **Scalar Latency:** The fixed scalar pipeline depth.

use std::collections::VecDeque;

use crate::config::Config;
use crate::core::arch::vector::VectorSnapshot;
use crate::isa::instruction::ComputeResource;

/// Outcome of one vector memory simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankReport {
    /// Cycles until every lane has drained and every bank is idle.
    pub cycles: u64,
    /// Lane-cycles spent waiting on a busy bank.
    pub conflict_stalls: u64,
}

/// Scratch state of one memory bank.
#[derive(Clone, Copy, Debug, Default)]
struct Bank {
    busy: bool,
    remaining: u64,
}

/// Latency calculator parameterised by the core configuration.
#[derive(Clone, Debug)]
pub struct LatencyModel {
    config: Config,
}

impl LatencyModel {
    /// Builds the model from a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Enabled elements handled by each lane when the vector is spread
    /// round-robin over the lanes.
    pub fn lane_occupancy(&self, snapshot: VectorSnapshot) -> Vec<u64> {
        let mut lanes = vec![0u64; self.config.num_lanes.max(1)];
        let width = lanes.len();
        for elem in 0..snapshot.length {
            if snapshot.mask.is_set(elem) {
                lanes[elem % width] += 1;
            }
        }
        lanes
    }

    /// Cycles a compute instruction holds `resource`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcsim_core::config::Config;
    /// use vcsim_core::core::arch::vector::{VectorMask, VectorSnapshot};
    /// use vcsim_core::core::pipeline::latency::LatencyModel;
    /// use vcsim_core::isa::instruction::ComputeResource;
    ///
    /// let config = Config { num_lanes: 4, pipeline_depth_add: 5, ..Config::default() };
    /// let model = LatencyModel::new(&config);
    /// let snap = VectorSnapshot { length: 8, mask: VectorMask::ALL_ONES };
    /// assert_eq!(model.compute_latency(ComputeResource::Adder, snap), 6);
    /// ```
    pub fn compute_latency(&self, resource: ComputeResource, snapshot: VectorSnapshot) -> u64 {
        let occupancy = self
            .lane_occupancy(snapshot)
            .into_iter()
            .max()
            .unwrap_or(0);
        (self.config.pipeline_depth(resource) + occupancy).saturating_sub(1)
    }

    /// Latency of the scalar pipeline.
    pub const fn scalar_latency(&self) -> u64 {
        self.config.pipeline_depth_scalar
    }

    /// Simulates a vector memory access over `addrs`.
    ///
    /// Addresses are spread round-robin into per-lane FIFOs. Each cycle, busy
    /// banks count down and free at zero, then lanes in index order offer their
    /// head address to bank `addr % num_banks`; an idle bank takes it and stays
    /// busy for the bank busy time. Lower-indexed lanes win ties.
    pub fn memory_latency(&self, addrs: &[usize]) -> BankReport {
        let num_lanes = self.config.num_lanes.max(1);
        let num_banks = self.config.vdm_num_banks.max(1);
        let mut lanes: Vec<VecDeque<usize>> = vec![VecDeque::new(); num_lanes];
        for (i, addr) in addrs.iter().enumerate() {
            lanes[i % num_lanes].push_back(*addr);
        }
        let mut banks = vec![Bank::default(); num_banks];
        let mut report = BankReport::default();

        loop {
            let lanes_idle = lanes.iter().all(VecDeque::is_empty);
            let banks_idle = banks.iter().all(|b| !b.busy);
            if lanes_idle && banks_idle {
                break;
            }
            report.cycles += 1;

            for bank in banks.iter_mut().filter(|b| b.busy) {
                bank.remaining = bank.remaining.saturating_sub(1);
                if bank.remaining == 0 {
                    bank.busy = false;
                }
            }

            for lane in &mut lanes {
                let Some(&addr) = lane.front() else {
                    continue;
                };
                let bank = &mut banks[addr % num_banks];
                if bank.busy {
                    report.conflict_stalls += 1;
                } else {
                    let _ = lane.pop_front();
                    bank.busy = true;
                    bank.remaining = self.config.vdm_bank_busy_time;
                }
            }
        }

        tracing::trace!(
            addrs = addrs.len(),
            cycles = report.cycles,
            conflicts = report.conflict_stalls,
            "memory latency simulated"
        );
        report
    }
}
