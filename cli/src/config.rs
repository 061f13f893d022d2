//! Extractor configuration, loaded from YAML or JSON.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use txextract_observability::LogConfig;
use txextract_registry::StaticDelegates;

/// A protocol contract the relay tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub address: Address,
    /// Delegate contract used for order hashing; required for cancellations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Address>,
}

/// Top-level extractor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Directory of JSON ABI files feeding the method registry
    #[serde(default = "default_abi_dir")]
    pub abi_dir: PathBuf,
    #[serde(default)]
    pub protocols: Vec<ProtocolConfig>,
    #[serde(default)]
    pub log: LogConfig,
    /// Transactions per rayon batch
    #[serde(default = "default_batch_chunk_size")]
    pub batch_chunk_size: usize,
}

fn default_abi_dir() -> PathBuf { PathBuf::from("./abis") }
fn default_batch_chunk_size() -> usize { 256 }

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            abi_dir: default_abi_dir(),
            protocols: vec![],
            log: LogConfig::default(),
            batch_chunk_size: default_batch_chunk_size(),
        }
    }
}

impl ExtractorConfig {
    /// Load from `path`; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
        let config = if is_json {
            serde_json::from_str(&content).context("parse JSON config")?
        } else {
            serde_yaml::from_str(&content).context("parse YAML config")?
        };
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Protocol → delegate map for the extractor.
    pub fn delegates(&self) -> StaticDelegates {
        self.protocols
            .iter()
            .filter_map(|p| p.delegate.map(|d| (p.address, d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txextract_core::context::DelegateResolver;

    const YAML: &str = r#"
abi_dir: /etc/txextract/abis
protocols:
  - address: "0x8d8812b72d1e4ffcec158d25f56748b7d67c1e78"
    delegate: "0x17233e07c67d086464fd408148c3abb56245fa64"
  - address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
log:
  level: debug
  json: true
batch_chunk_size: 64
"#;

    #[test]
    fn parses_yaml() {
        let config: ExtractorConfig = serde_yaml::from_str(YAML).unwrap();
        assert_eq!(config.abi_dir, PathBuf::from("/etc/txextract/abis"));
        assert_eq!(config.protocols.len(), 2);
        assert!(config.protocols[1].delegate.is_none());
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.batch_chunk_size, 64);

        let delegates = config.delegates();
        assert_eq!(delegates.len(), 1);
        assert_eq!(
            delegates.delegate_for(&config.protocols[0].address),
            config.protocols[0].delegate
        );
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: ExtractorConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.batch_chunk_size, 256);
    }

    #[test]
    fn loads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txextract.json");
        std::fs::write(&path, r#"{"batch_chunk_size": 8}"#).unwrap();
        let config = ExtractorConfig::load(&path).unwrap();
        assert_eq!(config.batch_chunk_size, 8);
        assert_eq!(config.abi_dir, PathBuf::from("./abis"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ExtractorConfig::load(Path::new("/nonexistent/txextract.yaml")).unwrap_err();
        assert!(err.to_string().contains("read config file"));
    }
}
