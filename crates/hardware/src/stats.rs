//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the vector core. It provides:
//! 1. **Cycle and IPC:** Total cycles, instruction counts per stage, and derived metrics.
//! 2. **Queues:** Dispatches and peak occupancy per issue class.
//! 3. **Stalls:** Fetch-stall cycles split into full-queue and register-hazard causes.
//! 4. **Resources:** Busy cycles per execution resource.
//! 5. **Memory:** Vector addresses issued and bank-conflict stalls.

use std::io::{self, Write};
use std::time::Instant;

use crate::core::pipeline::resources::Resource;
use crate::isa::instruction::IssueClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Lines read from instruction memory.
    pub instructions_fetched: u64,
    /// Instructions admitted into an issue queue.
    pub instructions_issued: u64,
    /// Instructions handed to an execution resource.
    pub instructions_dispatched: u64,
    /// Instructions whose resource finished.
    pub instructions_retired: u64,

    /// Dispatches per issue class, indexed by `IssueClass::index`.
    pub dispatched_by_class: [u64; 3],
    /// Highest occupancy seen per issue queue.
    pub queue_peak: [usize; 3],

    /// Cycles fetch stalled because the target queue was full.
    pub stalls_queue_full: u64,
    /// Cycles fetch stalled on a busy register.
    pub stalls_register_hazard: u64,

    /// Busy cycles per resource, indexed by `Resource::index`.
    pub resource_busy: [u64; 6],

    /// Vector memory addresses issued to the banks.
    pub vector_accesses: u64,
    /// Lane-cycles lost waiting on a busy bank.
    pub bank_conflict_stalls: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            instructions_issued: 0,
            instructions_dispatched: 0,
            instructions_retired: 0,
            dispatched_by_class: [0; 3],
            queue_peak: [0; 3],
            stalls_queue_full: 0,
            stalls_register_hazard: 0,
            resource_busy: [0; 6],
            vector_accesses: 0,
            bank_conflict_stalls: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "queues", "resources", "memory"];

const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

fn percent(part: u64, whole: u64) -> f64 {
    (part as f64 / whole.max(1) as f64) * 100.0
}

impl SimStats {
    /// Total fetch-stall cycles.
    pub const fn stall_cycles(&self) -> u64 {
        self.stalls_queue_full + self.stalls_register_hazard
    }

    /// Writes the requested sections to `out`.
    ///
    /// Each element of `sections` should be one of `STATS_SECTIONS`; an empty
    /// slice writes every section.
    pub fn write_sections<W: Write>(&self, out: &mut W, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);

        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc as f64;
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            writeln!(out, "\n{RULE}")?;
            writeln!(out, "VECTOR CORE SIMULATION STATISTICS")?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_freq                 {khz:.2} kHz")?;
            writeln!(out, "sim_fetched              {}", self.instructions_fetched)?;
            writeln!(out, "sim_issued               {}", self.instructions_issued)?;
            writeln!(out, "sim_dispatched           {}", self.instructions_dispatched)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_ipc                  {ipc:.4}")?;
            writeln!(out, "{THIN_RULE}")?;
        }
        if want("queues") {
            writeln!(out, "ISSUE QUEUES")?;
            for class in IssueClass::ALL {
                let i = class.index();
                writeln!(
                    out,
                    "  {:<22} {} (peak {})",
                    format!("dispatch.{class}"),
                    self.dispatched_by_class[i],
                    self.queue_peak[i]
                )?;
            }
            writeln!(
                out,
                "  stalls.queue_full      {} ({:.2}%)",
                self.stalls_queue_full,
                percent(self.stalls_queue_full, cyc)
            )?;
            writeln!(
                out,
                "  stalls.reg_hazard      {} ({:.2}%)",
                self.stalls_register_hazard,
                percent(self.stalls_register_hazard, cyc)
            )?;
            writeln!(out, "{THIN_RULE}")?;
        }
        if want("resources") {
            writeln!(out, "RESOURCE UTILIZATION")?;
            for resource in Resource::ALL {
                let busy = self.resource_busy[resource.index()];
                writeln!(
                    out,
                    "  {:<22} {} ({:.2}%)",
                    format!("busy.{resource}"),
                    busy,
                    percent(busy, cyc)
                )?;
            }
            writeln!(out, "{THIN_RULE}")?;
        }
        if want("memory") {
            writeln!(out, "VECTOR MEMORY")?;
            writeln!(out, "  vmem.accesses          {}", self.vector_accesses)?;
            writeln!(out, "  vmem.bank_conflicts    {}", self.bank_conflict_stalls)?;
        }
        writeln!(out, "{RULE}")
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        let stdout = io::stdout();
        if let Err(e) = self.write_sections(&mut stdout.lock(), sections) {
            tracing::warn!(error = %e, "failed to print statistics");
        }
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
