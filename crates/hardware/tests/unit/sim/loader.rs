//! # Loader Tests

use std::fs;

use pretty_assertions::assert_eq;
use vcsim_core::common::error::{ConfigError, LoadError, SimError};
use vcsim_core::sim::loader::{self, load_workload};
use vcsim_core::soc::traits::InstructionSource;

use super::{CONFIG, write_workload};

#[test]
fn test_loads_complete_workload() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "LS SR1 (0)\nHALT\n", "7\n8\n", "1\n2\n3\n");
    let workload = load_workload(dir.path(), None).unwrap();
    assert_eq!(workload.config.num_lanes, 4);
    assert_eq!(workload.program.len(), 2);
    assert_eq!(&workload.system.sdmem.words()[..3], &[7, 8, 0]);
    assert_eq!(&workload.system.vdmem.words()[..4], &[1, 2, 3, 0]);
}

#[test]
fn test_fallback_program_name() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "", "", "");
    fs::remove_file(dir.path().join("Code.asm")).unwrap();
    fs::write(dir.path().join("CodeOP.asm"), "CVM\n").unwrap();
    assert_eq!(loader::program_path(dir.path()), dir.path().join("CodeOP.asm"));
    assert_eq!(load_workload(dir.path(), None).unwrap().program.len(), 1);
}

#[test]
fn test_config_override_path() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "", "", "");
    let other = dir.path().join("wide.txt");
    fs::write(&other, CONFIG.replace("numLanes = 4", "numLanes = 16")).unwrap();
    let workload = load_workload(dir.path(), Some(other.as_path())).unwrap();
    assert_eq!(workload.config.num_lanes, 16);
}

#[test]
fn test_missing_config_parameter_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "", "", "");
    fs::write(dir.path().join("Config.txt"), CONFIG.replace("vdmNumBanks = 16\n", "")).unwrap();
    let err = load_workload(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::MissingParameter(ref k)) if k == "vdmNumBanks"
    ));
}

#[test]
fn test_missing_memory_image() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "", "", "");
    fs::remove_file(dir.path().join("VDMEM.txt")).unwrap();
    let err = load_workload(dir.path(), None).unwrap_err();
    assert!(matches!(err, SimError::Load(LoadError::Io { .. })));
}

#[test]
fn test_bad_image_word_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "", "1\n2\nthree\n", "");
    let err = load_workload(dir.path(), None).unwrap_err();
    assert!(matches!(err, SimError::Load(LoadError::Parse { line: 3, .. })));
}

#[test]
fn test_oversized_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = "0\n".repeat(8193);
    write_workload(dir.path(), "", &image, "");
    let err = load_workload(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        SimError::Load(LoadError::ImageTooLarge {
            len: 8193,
            capacity: 8192,
            ..
        })
    ));
}

#[test]
fn test_literal_address_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    write_workload(dir.path(), "CVM\nSS SR1 (8192)\n", "", "");
    let err = load_workload(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        SimError::Load(LoadError::AddressOutOfRange {
            pc: 1,
            memory: "SDMEM",
            address: 8192,
            ..
        })
    ));
}
