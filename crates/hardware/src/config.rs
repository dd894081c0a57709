//! Configuration system for the vector core simulator.
//!
//! This module defines the parameters that shape the simulated core. It provides:
//! 1. **Defaults:** Baseline queue depths, lane/bank counts, and pipeline depths.
//! 2. **Structure:** A flat `Config` deserialized with serde from camelCase keys.
//! 3. **Sources:** The `Config.txt` `key = value` format and JSON objects.
//! 4. **Validation:** Missing required parameters and unusable values are rejected
//!    before any cycle runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::common::constants::DEFAULT_MAX_CYCLES;
use crate::common::error::ConfigError;
use crate::isa::instruction::{ComputeResource, IssueClass};

/// Default configuration constants for the simulator.
///
/// These values back `Config::default()`; parameter files must still name every
/// required parameter explicitly.
mod defaults {
    /// Depth of the vector compute queue.
    pub const COMPUTE_QUEUE_DEPTH: usize = 4;

    /// Depth of the vector data (load/store) queue.
    pub const DATA_QUEUE_DEPTH: usize = 4;

    /// Number of parallel vector lanes.
    pub const NUM_LANES: usize = 4;

    /// Number of independently arbitrated vector memory banks.
    pub const VDM_NUM_BANKS: usize = 16;

    /// Cycles a bank stays busy after accepting one access.
    pub const VDM_BANK_BUSY_TIME: u64 = 2;

    /// Vector adder pipeline depth.
    pub const PIPELINE_DEPTH_ADD: u64 = 2;

    /// Vector multiplier pipeline depth.
    pub const PIPELINE_DEPTH_MUL: u64 = 12;

    /// Vector divider pipeline depth.
    pub const PIPELINE_DEPTH_DIV: u64 = 8;

    /// Vector shuffle unit pipeline depth.
    pub const PIPELINE_DEPTH_SHUFFLE: u64 = 5;

    /// Scalar pipeline latency.
    pub const PIPELINE_DEPTH_SCALAR: u64 = 1;
}

/// Parameters every configuration source must provide.
pub const REQUIRED_PARAMETERS: &[&str] = &[
    "computeQueueDepth",
    "dataQueueDepth",
    "numLanes",
    "vdmNumBanks",
    "vdmBankBusyTime",
    "pipelineDepthAdd",
    "pipelineDepthMul",
    "pipelineDepthDiv",
    "pipelineDepthShuffle",
];

/// Root configuration structure.
///
/// Keys are camelCase, matching the `Config.txt` parameter names. Unknown keys
/// are ignored so that parameter files shared with other tools still load.
///
/// # Examples
///
/// Parsing the flat parameter format:
///
/// ```
/// use vcsim_core::config::Config;
///
/// let text = "\
/// ## Vector core
/// computeQueueDepth = 4
/// dataQueueDepth = 2      # loads and stores
/// numLanes = 4
/// vdmNumBanks = 16
/// vdmBankBusyTime = 2
/// pipelineDepthAdd = 2
/// pipelineDepthMul = 12
/// pipelineDepthDiv = 8
/// pipelineDepthShuffle = 5
/// ";
/// let config = Config::parse_flat(text).unwrap();
/// assert_eq!(config.data_queue_depth, 2);
/// assert_eq!(config.pipeline_depth_scalar, 1);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use vcsim_core::config::Config;
///
/// let json = r#"{
///     "computeQueueDepth": 8, "dataQueueDepth": 8, "scalarQueueDepth": 2,
///     "numLanes": 8, "vdmNumBanks": 32, "vdmBankBusyTime": 3,
///     "pipelineDepthAdd": 2, "pipelineDepthMul": 6,
///     "pipelineDepthDiv": 10, "pipelineDepthShuffle": 4
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.num_lanes, 8);
/// assert_eq!(config.scalar_queue_depth, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Depth of the vector compute queue.
    pub compute_queue_depth: usize,

    /// Depth of the vector data queue.
    pub data_queue_depth: usize,

    /// Depth of the scalar queue; falls back to `compute_queue_depth`.
    #[serde(default)]
    pub scalar_queue_depth: Option<usize>,

    /// Number of vector lanes elements are distributed over.
    pub num_lanes: usize,

    /// Number of vector memory banks.
    pub vdm_num_banks: usize,

    /// Cycles a bank stays busy per access.
    pub vdm_bank_busy_time: u64,

    /// Adder pipeline depth.
    pub pipeline_depth_add: u64,

    /// Multiplier pipeline depth.
    pub pipeline_depth_mul: u64,

    /// Divider pipeline depth.
    pub pipeline_depth_div: u64,

    /// Shuffle unit pipeline depth.
    pub pipeline_depth_shuffle: u64,

    /// Scalar pipeline latency.
    #[serde(default = "Config::default_pipeline_depth_scalar")]
    pub pipeline_depth_scalar: u64,

    /// Hard bound on simulated cycles.
    #[serde(default = "Config::default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compute_queue_depth: defaults::COMPUTE_QUEUE_DEPTH,
            data_queue_depth: defaults::DATA_QUEUE_DEPTH,
            scalar_queue_depth: None,
            num_lanes: defaults::NUM_LANES,
            vdm_num_banks: defaults::VDM_NUM_BANKS,
            vdm_bank_busy_time: defaults::VDM_BANK_BUSY_TIME,
            pipeline_depth_add: defaults::PIPELINE_DEPTH_ADD,
            pipeline_depth_mul: defaults::PIPELINE_DEPTH_MUL,
            pipeline_depth_div: defaults::PIPELINE_DEPTH_DIV,
            pipeline_depth_shuffle: defaults::PIPELINE_DEPTH_SHUFFLE,
            pipeline_depth_scalar: defaults::PIPELINE_DEPTH_SCALAR,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

impl Config {
    /// Returns the default scalar pipeline latency.
    const fn default_pipeline_depth_scalar() -> u64 {
        defaults::PIPELINE_DEPTH_SCALAR
    }

    /// Returns the default cycle bound.
    const fn default_max_cycles() -> u64 {
        DEFAULT_MAX_CYCLES
    }

    /// Loads a configuration file.
    ///
    /// Files with a `.json` extension are read as JSON; anything else uses the
    /// flat `key = value` format.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&text)?
        } else {
            Self::parse_flat(&text)?
        };
        tracing::info!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// Parses the flat `key = value` format.
    ///
    /// Blank lines and lines starting with `#` are skipped; anything after a `#`
    /// on a parameter line is a comment.
    pub fn parse_flat(text: &str) -> Result<Self, ConfigError> {
        let mut params = BTreeMap::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parse_err = || ConfigError::Parse {
                line: i + 1,
                text: raw.to_string(),
            };
            let (key, rest) = line.split_once('=').ok_or_else(parse_err)?;
            let value = rest.split('#').next().unwrap_or_default().trim();
            let value: i64 = value.parse().map_err(|_| parse_err())?;
            let key = key.trim();
            if key.is_empty() {
                return Err(parse_err());
            }
            if params.insert(key.to_string(), value).is_some() {
                tracing::warn!(key, "parameter given more than once; last value wins");
            }
        }
        Self::from_params(&params)
    }

    /// Builds a configuration from named integer parameters.
    pub fn from_params(params: &BTreeMap<String, i64>) -> Result<Self, ConfigError> {
        if let Some(missing) = REQUIRED_PARAMETERS
            .iter()
            .find(|key| !params.contains_key(**key))
        {
            return Err(ConfigError::MissingParameter((*missing).to_string()));
        }
        if let Some((key, value)) = params.iter().find(|(_, v)| **v < 0) {
            return Err(ConfigError::InvalidValue {
                key: key.clone(),
                value: *value,
                reason: "parameters must not be negative",
            });
        }
        let object: Map<String, Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(*v)))
            .collect();
        let config: Self = serde_json::from_value(Value::Object(object))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON object.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        if let Value::Object(map) = &value {
            if let Some(missing) = REQUIRED_PARAMETERS
                .iter()
                .find(|key| !map.contains_key(**key))
            {
                return Err(ConfigError::MissingParameter((*missing).to_string()));
            }
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("computeQueueDepth", self.compute_queue_depth as u64),
            ("dataQueueDepth", self.data_queue_depth as u64),
            (
                "scalarQueueDepth",
                self.scalar_queue_depth.unwrap_or(1) as u64,
            ),
            ("numLanes", self.num_lanes as u64),
            ("vdmNumBanks", self.vdm_num_banks as u64),
            ("maxCycles", self.max_cycles),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: 0,
                    reason: "must be at least 1",
                });
            }
        }
        Ok(())
    }

    /// Configured depth of the queue for `class`.
    pub fn queue_depth(&self, class: IssueClass) -> usize {
        match class {
            IssueClass::VectorCompute => self.compute_queue_depth,
            IssueClass::VectorData => self.data_queue_depth,
            IssueClass::ScalarOps => self.scalar_queue_depth.unwrap_or(self.compute_queue_depth),
        }
    }

    /// Configured pipeline depth of a vector compute resource.
    pub const fn pipeline_depth(&self, resource: ComputeResource) -> u64 {
        match resource {
            ComputeResource::Adder => self.pipeline_depth_add,
            ComputeResource::Multiplier => self.pipeline_depth_mul,
            ComputeResource::Divider => self.pipeline_depth_div,
            ComputeResource::Shuffle => self.pipeline_depth_shuffle,
        }
    }
}
