//! Autoencoder configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML or JSON)
//! 2. Environment variables (with QAE_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::binder::BindingPolicy;
use crate::builder::{AnsatzSpec, RegisterLayout, SUPPORTED_QUBIT_COUNT};
use crate::composer::{DecoderOption, DecoderPolicy};
use crate::error::{AnsatzError, AnsatzResult};
use crate::layering::LayeringPolicy;
use crate::topology::Topology;

/// Complete autoencoder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoencoderConfig {
    /// Logical qubit count
    #[serde(default = "default_qubit_count")]
    pub qubit_count: u32,

    /// Number of leading qubits kept at the bottleneck
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Decoder derivation policy
    #[serde(default)]
    pub decoder: DecoderPolicy,

    /// Layer stacking policy
    #[serde(default)]
    pub layering: LayeringPolicy,

    /// Entangling pairs
    #[serde(default)]
    pub topology: Topology,

    /// Register width convention
    #[serde(default)]
    pub layout: RegisterLayout,

    /// Handling of binding anomalies
    #[serde(default)]
    pub binding: BindingPolicy,
}

fn default_qubit_count() -> u32 {
    SUPPORTED_QUBIT_COUNT
}

fn default_compression_level() -> u32 {
    2
}

impl Default for AutoencoderConfig {
    fn default() -> Self {
        AutoencoderConfig {
            qubit_count: default_qubit_count(),
            compression_level: default_compression_level(),
            decoder: DecoderPolicy::default(),
            layering: LayeringPolicy::default(),
            topology: Topology::default(),
            layout: RegisterLayout::default(),
            binding: BindingPolicy::default(),
        }
    }
}

impl AutoencoderConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> AnsatzResult<Self> {
        let document: serde_json::Value = serde_yaml_ng::from_str(contents)
            .map_err(|e| AnsatzError::Config(format!("Parse error: {e}")))?;
        Self::from_document(document)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(contents: &str) -> AnsatzResult<Self> {
        let document: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| AnsatzError::Config(format!("Parse error: {e}")))?;
        Self::from_document(document)
    }

    /// Decode a parsed document.
    ///
    /// The decoder is resolved on its own so that an unknown option is
    /// reported as [`AnsatzError::InvalidDecoderOption`].
    fn from_document(mut document: serde_json::Value) -> AnsatzResult<Self> {
        let decoder = document
            .as_object_mut()
            .and_then(|fields| fields.remove("decoder"))
            .map(|raw| {
                let option: DecoderOption = serde_json::from_value(raw)
                    .map_err(|e| AnsatzError::InvalidDecoderOption(e.to_string()))?;
                DecoderPolicy::try_from(option)
            })
            .transpose()?;

        let mut config: AutoencoderConfig = serde_json::from_value(document)
            .map_err(|e| AnsatzError::Config(format!("Parse error: {e}")))?;
        if let Some(decoder) = decoder {
            config.decoder = decoder;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; `.json` is JSON, anything else YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnsatzResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AnsatzError::Config(format!("IO error: {}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Apply `QAE_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> AnsatzResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `QAE_*` overrides from `lookup`.
    ///
    /// Only keys that `lookup` returns override the current values.
    pub fn apply_overrides<F>(mut self, lookup: F) -> AnsatzResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QAE_QUBIT_COUNT") {
            self.qubit_count = parse_override("QAE_QUBIT_COUNT", &v)?;
        }
        if let Some(v) = lookup("QAE_COMPRESSION_LEVEL") {
            self.compression_level = parse_override("QAE_COMPRESSION_LEVEL", &v)?;
        }
        if let Some(v) = lookup("QAE_DECODER") {
            self.decoder = v.parse()?;
        }
        if let Some(v) = lookup("QAE_LAYERING") {
            self.layering = v.parse()?;
        }
        if let Some(v) = lookup("QAE_LAYOUT") {
            self.layout = v.parse()?;
        }
        if let Some(v) = lookup("QAE_BINDING") {
            self.binding = v.parse()?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AnsatzResult<()> {
        self.ansatz_spec().validate()
    }

    /// The ansatz spec shared by encoder and decoder.
    pub fn ansatz_spec(&self) -> AnsatzSpec {
        AnsatzSpec {
            qubit_count: self.qubit_count,
            compression_level: self.compression_level,
            layering: self.layering.clone(),
            topology: self.topology.clone(),
        }
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> AnsatzResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AnsatzError::Config(format!("Invalid value for {key}: '{value}'")))
}
