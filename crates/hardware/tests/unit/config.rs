//! # Configuration Tests
//!
//! Tests for the flat `Config.txt` format, JSON deserialization, defaults and
//! validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vcsim_core::common::error::ConfigError;
use vcsim_core::config::{Config, REQUIRED_PARAMETERS};
use vcsim_core::isa::instruction::{ComputeResource, IssueClass};

const FULL: &str = "\
computeQueueDepth = 4
dataQueueDepth = 2
numLanes = 8
vdmNumBanks = 16
vdmBankBusyTime = 3
pipelineDepthAdd = 2
pipelineDepthMul = 12
pipelineDepthDiv = 8
pipelineDepthShuffle = 5
";

fn without(key: &str) -> String {
    FULL.lines()
        .filter(|line| !line.starts_with(key))
        .map(|line| format!("{line}\n"))
        .collect()
}

#[test]
fn test_flat_config_parses_every_parameter() {
    let config = Config::parse_flat(FULL).unwrap();
    assert_eq!(
        config,
        Config {
            compute_queue_depth: 4,
            data_queue_depth: 2,
            scalar_queue_depth: None,
            num_lanes: 8,
            vdm_num_banks: 16,
            vdm_bank_busy_time: 3,
            pipeline_depth_add: 2,
            pipeline_depth_mul: 12,
            pipeline_depth_div: 8,
            pipeline_depth_shuffle: 5,
            pipeline_depth_scalar: 1,
            max_cycles: 1_000_000,
        }
    );
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let text = format!("# header\n\n{FULL}\n   # indented comment\n");
    let config = Config::parse_flat(&text.replace("numLanes = 8", "numLanes = 8 # lanes")).unwrap();
    assert_eq!(config.num_lanes, 8);
}

#[test]
fn test_optional_parameters_override_defaults() {
    let text = format!("{FULL}scalarQueueDepth = 1\npipelineDepthScalar = 3\nmaxCycles = 500\n");
    let config = Config::parse_flat(&text).unwrap();
    assert_eq!(config.queue_depth(IssueClass::ScalarOps), 1);
    assert_eq!(config.pipeline_depth_scalar, 3);
    assert_eq!(config.max_cycles, 500);
}

#[test]
fn test_unknown_keys_are_tolerated() {
    let text = format!("{FULL}someOtherTool = 7\n");
    assert!(Config::parse_flat(&text).is_ok());
}

#[rstest]
#[case("computeQueueDepth")]
#[case("dataQueueDepth")]
#[case("numLanes")]
#[case("vdmNumBanks")]
#[case("vdmBankBusyTime")]
#[case("pipelineDepthAdd")]
#[case("pipelineDepthMul")]
#[case("pipelineDepthDiv")]
#[case("pipelineDepthShuffle")]
fn test_missing_required_parameter(#[case] key: &str) {
    let err = Config::parse_flat(&without(key)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingParameter(ref k) if k == key));
}

#[test]
fn test_required_parameter_list_matches_cases() {
    assert_eq!(REQUIRED_PARAMETERS.len(), 9);
}

#[rstest]
#[case("computeQueueDepth = 0")]
#[case("dataQueueDepth = 0")]
#[case("numLanes = 0")]
#[case("vdmNumBanks = 0")]
fn test_zero_sizes_are_rejected(#[case] line: &str) {
    let key = line.split(' ').next().unwrap();
    let text = format!("{}{line}\n", without(key));
    let err = Config::parse_flat(&text).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { value: 0, .. }));
}

#[test]
fn test_negative_value_is_rejected() {
    let text = format!("{}pipelineDepthAdd = -1\n", without("pipelineDepthAdd"));
    let err = Config::parse_flat(&text).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref key, value: -1, .. } if key == "pipelineDepthAdd"
    ));
}

#[rstest]
#[case("numLanes 8", 1)]
#[case("numLanes = eight", 1)]
#[case(" = 3", 1)]
fn test_malformed_lines_report_line_number(#[case] bad: &str, #[case] line: usize) {
    let text = format!("{bad}\n{FULL}");
    let err = Config::parse_flat(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { line: l, .. } if l == line));
}

#[test]
fn test_json_config() {
    let json = r#"{
        "computeQueueDepth": 2, "dataQueueDepth": 3,
        "numLanes": 4, "vdmNumBanks": 8, "vdmBankBusyTime": 1,
        "pipelineDepthAdd": 2, "pipelineDepthMul": 6,
        "pipelineDepthDiv": 10, "pipelineDepthShuffle": 4
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.data_queue_depth, 3);
    assert_eq!(config.pipeline_depth(ComputeResource::Divider), 10);
    assert_eq!(config.queue_depth(IssueClass::ScalarOps), 2);
}

#[test]
fn test_json_missing_parameter() {
    let err = Config::from_json(r#"{ "numLanes": 4 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingParameter(ref k) if k == "computeQueueDepth"));
}

#[test]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let flat = dir.path().join("Config.txt");
    let json = dir.path().join("config.json");
    std::fs::write(&flat, FULL).unwrap();
    std::fs::write(
        &json,
        r#"{"computeQueueDepth":1,"dataQueueDepth":1,"numLanes":1,"vdmNumBanks":1,
            "vdmBankBusyTime":1,"pipelineDepthAdd":1,"pipelineDepthMul":1,
            "pipelineDepthDiv":1,"pipelineDepthShuffle":1}"#,
    )
    .unwrap();
    assert_eq!(Config::load(&flat).unwrap().num_lanes, 8);
    assert_eq!(Config::load(&json).unwrap().num_lanes, 1);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("Config.txt")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[rstest]
#[case(ComputeResource::Adder, 2)]
#[case(ComputeResource::Multiplier, 12)]
#[case(ComputeResource::Divider, 8)]
#[case(ComputeResource::Shuffle, 5)]
fn test_pipeline_depth_per_resource(#[case] resource: ComputeResource, #[case] depth: u64) {
    let config = Config::parse_flat(FULL).unwrap();
    assert_eq!(config.pipeline_depth(resource), depth);
}
