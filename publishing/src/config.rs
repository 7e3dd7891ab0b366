//! Contract deployment configuration with TOML file support.

use std::path::Path;

use dnn_types::{BlockHash, DnnParams};
use dnn_utils::LogFormat;
use dnn_vrf::ChainSeedVrf;
use serde::{Deserialize, Serialize};

use crate::error::DnnError;

/// Configuration for deploying a DNN contract.
///
/// Can be loaded from a TOML file via [`DnnConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnnConfig {
    /// Hex-encoded 32-byte block hash seeding voter selection.
    /// The all-zero hash is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_seed: Option<String>,

    /// Randomness round reported alongside every draw.
    #[serde(default)]
    pub randomness_round: u64,

    /// Distinguishes deployments sharing an owner and chain seed.
    #[serde(default)]
    pub deployment_nonce: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deployment parameters. Fixed for the lifetime of the contract.
    #[serde(default)]
    pub params: DnnParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DnnConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DnnError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DnnError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DnnError> {
        toml::from_str(s).map_err(|e| DnnError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DnnError> {
        toml::to_string_pretty(self).map_err(|e| DnnError::Config(e.to_string()))
    }

    /// Check every field a deployment depends on.
    pub fn validate(&self) -> Result<(), DnnError> {
        self.params.validate()?;
        self.chain_seed_hash()?;
        self.log_format()?;
        Ok(())
    }

    /// Decode `chain_seed`; a leading `0x` is accepted.
    pub fn chain_seed_hash(&self) -> Result<BlockHash, DnnError> {
        let Some(seed) = &self.chain_seed else {
            return Ok(BlockHash::ZERO);
        };
        let digits = seed.strip_prefix("0x").unwrap_or(seed);
        let bytes = hex::decode(digits)
            .map_err(|e| DnnError::Config(format!("chain_seed is not hex: {e}")))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            DnnError::Config(format!("chain_seed must be 32 bytes, got {}", b.len()))
        })?;
        Ok(BlockHash::new(bytes))
    }

    /// The chain-seeded randomness provider this configuration describes.
    pub fn randomness(&self) -> Result<ChainSeedVrf, DnnError> {
        Ok(ChainSeedVrf::new(self.chain_seed_hash()?, self.randomness_round))
    }

    pub fn log_format(&self) -> Result<LogFormat, DnnError> {
        self.log_format
            .parse()
            .map_err(|e: dnn_utils::UnknownLogFormat| DnnError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this configuration.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber is already installed.
    pub fn init_logging(&self) -> Result<(), DnnError> {
        dnn_utils::init_logging(self.log_format()?, &self.log_level);
        Ok(())
    }
}

impl Default for DnnConfig {
    fn default() -> Self {
        Self {
            chain_seed: None,
            randomness_round: 0,
            deployment_nonce: 0,
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: DnnParams::default(),
        }
    }
}
