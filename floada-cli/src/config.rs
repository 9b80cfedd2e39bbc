//! Configuration

use std::path::Path;

use anyhow::{Context, Result};
use floada_core::FloadaConfig;

/// File config (or defaults) plus `FLOADA_*` overrides, then `--network`.
pub fn load(path: Option<&Path>, network: Option<&str>) -> Result<FloadaConfig> {
    let mut config = match path {
        Some(path) => FloadaConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FloadaConfig::from_env().context("reading FLOADA_* environment")?,
    };
    if let Some(network) = network {
        config.network = network.parse()?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floada_traits::Network;

    #[test]
    fn test_network_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floada.json");
        std::fs::write(&path, r#"{"network":"mainnet","default_fee":5}"#).unwrap();

        let config = load(Some(&path), Some("testnet")).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.default_fee, 5);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load(Some(Path::new("/nonexistent/floada.json")), None).unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }

    #[test]
    fn test_bad_network_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floada.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(load(Some(&path), Some("moonnet")).is_err());
    }
}
