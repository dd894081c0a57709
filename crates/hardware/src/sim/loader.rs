//! Workload Loader.
//!
//! This module reads a simulation workload from an I/O directory. It performs:
//! 1. **Configuration:** `Config.txt` (or an explicit override, flat or JSON).
//! 2. **Program:** `Code.asm`, with `CodeOP.asm` accepted as a fallback name.
//! 3. **Data Memories:** `SDMEM.txt` and `VDMEM.txt`, one word per line, zero-padded.
//! 4. **Validation:** Literal memory addresses in the program are checked against the
//!    memory sizes before any cycle runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{LoadError, SimError};
use crate::config::Config;
use crate::isa::decode::literal_addresses;
use crate::soc::imem::InstructionMemory;
use crate::soc::memory::DataMemory;
use crate::soc::System;

/// Configuration file name inside the I/O directory.
pub const CONFIG_FILE: &str = "Config.txt";

/// Program file name inside the I/O directory.
pub const PROGRAM_FILE: &str = "Code.asm";

/// Alternative program file name, used when `PROGRAM_FILE` is absent.
pub const FALLBACK_PROGRAM_FILE: &str = "CodeOP.asm";

/// Everything needed to start a simulation.
#[derive(Clone, Debug)]
pub struct Workload {
    /// Core configuration.
    pub config: Config,
    /// Program image.
    pub program: InstructionMemory,
    /// Initialized data memories.
    pub system: System,
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Program path inside `iodir`: `Code.asm`, or `CodeOP.asm` if only that exists.
pub fn program_path(iodir: &Path) -> PathBuf {
    let primary = iodir.join(PROGRAM_FILE);
    let fallback = iodir.join(FALLBACK_PROGRAM_FILE);
    if !primary.exists() && fallback.exists() {
        fallback
    } else {
        primary
    }
}

/// Reads and tokenizes a program file.
pub fn load_program(path: &Path) -> Result<InstructionMemory, LoadError> {
    let program = InstructionMemory::parse(&read_text(path)?);
    tracing::info!(path = %path.display(), lines = program.lines().len(), "program loaded");
    Ok(program)
}

/// Parses a data-memory image: one decimal word per line, blank lines ignored.
pub fn parse_image(path: &Path, text: &str) -> Result<Vec<i32>, LoadError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim().parse::<i32>().map_err(|_| LoadError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

/// Loads an image file into `memory`, zero-filling the rest.
///
/// Images longer than the memory are rejected.
pub fn load_memory(path: &Path, memory: &mut DataMemory) -> Result<(), LoadError> {
    let image = parse_image(path, &read_text(path)?)?;
    let capacity = memory.size();
    memory.load(&image).map_err(|_| LoadError::ImageTooLarge {
        path: path.to_path_buf(),
        len: image.len(),
        capacity,
    })?;
    tracing::info!(memory = memory.name(), path = %path.display(), words = image.len(), "memory image loaded");
    Ok(())
}

/// Checks every literal load/store address against the size of its memory.
pub fn validate_addresses(program: &InstructionMemory, system: &System) -> Result<(), LoadError> {
    for (pc, tokens) in program.lines().iter().enumerate() {
        let Some((opcode, addrs)) = literal_addresses(tokens) else {
            continue;
        };
        let Some(space) = opcode.memory_space() else {
            continue;
        };
        let memory = system.memory(space);
        if let Some(&address) = addrs.iter().find(|a| !memory.contains(**a)) {
            return Err(LoadError::AddressOutOfRange {
                pc,
                mnemonic: opcode.mnemonic().to_string(),
                memory: space.name(),
                address,
                size: memory.size(),
            });
        }
    }
    Ok(())
}

/// Loads the complete workload from `iodir`.
///
/// # Arguments
///
/// * `iodir` - Directory holding the program and memory images.
/// * `config_path` - Configuration file to use instead of `iodir/Config.txt`.
pub fn load_workload(iodir: &Path, config_path: Option<&Path>) -> Result<Workload, SimError> {
    let config_path = config_path.map_or_else(|| iodir.join(CONFIG_FILE), Path::to_path_buf);
    let config = Config::load(&config_path)?;
    let program = load_program(&program_path(iodir))?;

    let mut system = System::new();
    load_memory(&iodir.join("SDMEM.txt"), &mut system.sdmem)?;
    load_memory(&iodir.join("VDMEM.txt"), &mut system.vdmem)?;
    validate_addresses(&program, &system)?;

    Ok(Workload {
        config,
        program,
        system,
    })
}
