//! Vector core timing simulator CLI.
//!
//! This binary runs one workload directory through the simulator. It performs:
//! 1. **Load:** Reads `Config.txt`, `Code.asm`, `SDMEM.txt` and `VDMEM.txt` from the I/O directory.
//! 2. **Run:** Clocks the core until it drains, faults on decode, or hits the cycle bound.
//! 3. **Report:** Prints the cycle count and statistics, then dumps memories and registers.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vcsim_core::Simulator;
use vcsim_core::core::HaltReason;
use vcsim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "vcsim",
    author,
    version,
    about = "Cycle-level timing simulator for a decoupled vector core",
    long_about = "Runs the program in an I/O directory and reports the total cycle count.\n\nThe directory must hold Config.txt, Code.asm, SDMEM.txt and VDMEM.txt. Final memories and registers are written back into it.\n\nExamples:\n  vcsim --iodir tests/dot_product\n  vcsim --iodir run --config sweep/lanes8.json --stats summary,queues"
)]
struct Cli {
    /// I/O directory holding the workload.
    #[arg(long)]
    iodir: PathBuf,

    /// Configuration file to use instead of `<iodir>/Config.txt` (flat or `.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured cycle bound.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Statistics sections to print.
    #[arg(long, value_delimiter = ',', default_value = "summary")]
    stats: Vec<String>,

    /// Skips writing the final state back to the I/O directory.
    #[arg(long)]
    no_dump: bool,

    /// Logs every pipeline event (equivalent to `RUST_LOG=trace`).
    #[arg(long)]
    trace: bool,
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    if let Some(unknown) = cli
        .stats
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        eprintln!(
            "Error: unknown stats section `{unknown}` (expected one of: {})",
            STATS_SECTIONS.join(", ")
        );
        process::exit(2);
    }

    tracing::info!(iodir = %cli.iodir.display(), "loading workload");
    let mut sim = match Simulator::from_iodir(&cli.iodir, cli.config.as_deref()) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if let Some(cap) = cli.max_cycles {
        sim.core.set_max_cycles(cap);
    }

    let reason = match sim.run() {
        Ok(reason) => reason,
        Err(e) => {
            eprintln!("\n[!] {e}");
            sim.stats().print_sections(&cli.stats);
            process::exit(1);
        }
    };

    match &reason {
        HaltReason::Drained => println!("[*] Program drained"),
        other => println!("[*] Halted early: {other}"),
    }
    println!("[*] Total cycles: {}", sim.cycles());
    sim.stats().print_sections(&cli.stats);

    if cli.no_dump {
        return;
    }
    if let Err(e) = sim.dump(&cli.iodir) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
