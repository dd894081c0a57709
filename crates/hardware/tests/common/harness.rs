use vcsim_core::common::error::SimError;
use vcsim_core::config::Config;
use vcsim_core::core::{HaltReason, VectorCore};
use vcsim_core::isa::instruction::IssueClass;
use vcsim_core::soc::imem::InstructionMemory;
use vcsim_core::soc::traits::InstructionSource;

/// Configuration used by most core tests.
///
/// 64 lanes make every full-length vector occupy a lane for one element, so
/// a compute instruction holds its unit for exactly the pipeline depth.
pub fn test_config() -> Config {
    Config {
        compute_queue_depth: 4,
        data_queue_depth: 4,
        scalar_queue_depth: None,
        num_lanes: 64,
        vdm_num_banks: 16,
        vdm_bank_busy_time: 2,
        pipeline_depth_add: 6,
        pipeline_depth_mul: 6,
        pipeline_depth_div: 8,
        pipeline_depth_shuffle: 4,
        pipeline_depth_scalar: 1,
        max_cycles: 10_000,
    }
}

pub struct TestContext {
    pub core: VectorCore,
}

impl TestContext {
    /// Builds a core running `program` under `test_config()`.
    pub fn new(program: &str) -> Self {
        Self::with_config(test_config(), program)
    }

    /// Builds a core running `program` under `config`.
    pub fn with_config(config: Config, program: &str) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
        Self::with_source(&config, Box::new(InstructionMemory::parse(program)))
    }

    /// Builds a core fetching from an arbitrary source.
    pub fn with_source(config: &Config, source: Box<dyn InstructionSource>) -> Self {
        Self {
            core: VectorCore::new(config, source),
        }
    }

    /// Advances `n` cycles.
    pub fn step(&mut self, n: u64) {
        for _ in 0..n {
            self.core.tick();
        }
    }

    /// Runs to completion.
    pub fn run(&mut self) -> Result<HaltReason, SimError> {
        self.core.run()
    }

    /// Runs to completion, expecting the program to drain.
    pub fn run_drained(&mut self) -> u64 {
        let reason = self.core.run().unwrap();
        assert_eq!(reason, HaltReason::Drained);
        self.core.cycle
    }

    /// Queue occupancy for `class`.
    pub fn queued(&self, class: IssueClass) -> usize {
        self.core.queues.len(class)
    }
}
