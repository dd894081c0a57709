//! Simulator: owns the vector core and its data memories side-by-side.
//!
//! The core only models timing; the memories are carried alongside it so a
//! finished run can dump the complete architectural state.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::{HaltReason, VectorCore};
use crate::sim::loader::{self, Workload};
use crate::soc::System;
use crate::soc::traits::InstructionSource;
use crate::stats::SimStats;

/// Top-level simulator: vector core plus data memories.
#[derive(Debug)]
pub struct Simulator {
    /// Vector core (scheduling state, registers, stats).
    pub core: VectorCore,
    /// Scalar and vector data memories.
    pub system: System,
}

impl Simulator {
    /// Creates a simulator for `program` with the given memories.
    pub fn new(config: &Config, program: Box<dyn InstructionSource>, system: System) -> Self {
        Self {
            core: VectorCore::new(config, program),
            system,
        }
    }

    /// Creates a simulator from a loaded workload.
    pub fn from_workload(workload: Workload) -> Self {
        let Workload {
            config,
            program,
            system,
        } = workload;
        Self::new(&config, Box::new(program), system)
    }

    /// Loads `iodir` and creates a simulator for it.
    pub fn from_iodir(iodir: &Path, config_path: Option<&Path>) -> Result<Self, SimError> {
        loader::load_workload(iodir, config_path).map(Self::from_workload)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.core.tick();
    }

    /// Runs until the core halts.
    pub fn run(&mut self) -> Result<HaltReason, SimError> {
        let reason = self.core.run()?;
        tracing::info!(cycles = self.core.cycle, %reason, "simulation finished");
        Ok(reason)
    }

    /// Cycles simulated so far.
    pub const fn cycles(&self) -> u64 {
        self.core.cycle
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.core.stats
    }

    /// Writes the final state into `dir`.
    ///
    /// Produces `SDMEMOP.txt`, `VDMEMOP.txt`, and `SRF.txt`, `VRF.txt`, `VMR.txt`, `VLR.txt`.
    pub fn dump(&self, dir: &Path) -> Result<(), SimError> {
        for memory in [&self.system.sdmem, &self.system.vdmem] {
            let path = dir.join(format!("{}OP.txt", memory.name()));
            write_file(&path, |out| memory.dump(out))?;
        }
        for rf in self.core.register_files() {
            let path = dir.join(format!("{}.txt", rf.name()));
            write_file(&path, |out| rf.dump(out))?;
        }
        tracing::info!(dir = %dir.display(), "state dumped");
        Ok(())
    }
}

fn write_file<F>(path: &Path, body: F) -> Result<(), SimError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let dump_err = |source| SimError::Dump {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(dump_err)?);
    body(&mut out).map_err(dump_err)?;
    out.flush().map_err(dump_err)
}
