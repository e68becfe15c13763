//! Configuration loading
//!
//! The config file is TOML. An explicit path wins; otherwise
//! `./sigstash.toml` in the working directory is tried, then
//! `<config-dir>/sigstash/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name looked for in the working directory.
const LOCAL_CONFIG_FILE: &str = "sigstash.toml";

/// Bucket region used when the config leaves it unset.
const DEFAULT_REGION: &str = "us-east-1";

/// A chain whose signed transactions are stored in the bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chain {
    pub name: String,

    /// Bech32 address prefix
    #[serde(default)]
    pub prefix: String,

    /// Chain id used when signing
    #[serde(default)]
    pub id: String,

    /// Node signed transactions are broadcast to
    #[serde(default)]
    pub node: String,

    /// Denom used for fees
    #[serde(default)]
    pub denom: String,
}

/// A key transactions are signed with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Key {
    pub name: String,

    pub address: String,

    /// Name of the key in the local keyring, when it differs from `name`
    #[serde(default)]
    pub local_name: String,
}

/// Bucket endpoint and credentials, consumed opaquely at client
/// construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storage {
    /// Custom endpoint URL; unset means the provider default
    #[serde(default)]
    pub endpoint: Option<String>,

    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    pub access_key: String,

    pub secret_key: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Operator name
    #[serde(default)]
    pub user: String,

    pub storage: Storage,

    #[serde(default)]
    pub chains: Vec<Chain>,

    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Config {
    pub fn chain(&self, name: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.name == name)
    }

    pub fn key(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|key| key.name == name)
    }
}

/// Load configuration from `path`, or from the default locations when no
/// path is given.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let file = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => default_config_path()?,
    };
    let content = std::fs::read_to_string(&file).map_err(|source| Error::LocalRead {
        path: file.clone(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;
    if config.storage.bucket.is_empty() {
        return Err(Error::Config(format!(
            "{}: storage.bucket is required",
            file.display()
        )));
    }
    Ok(config)
}

fn default_config_path() -> Result<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(local);
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| Error::Config("could not determine config directory".into()))?;
    Ok(config_dir.join("sigstash").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        user = "operator"

        [storage]
        endpoint = "http://localhost:9000"
        bucket = "signing-artifacts"
        access_key = "accesskey"
        secret_key = "secretkey"

        [[chains]]
        name = "cosmoshub"
        prefix = "cosmos"
        id = "cosmoshub-4"
        node = "https://rpc.cosmos.network:443"
        denom = "uatom"

        [[keys]]
        name = "validator1"
        address = "cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq"
        local_name = "val1"
    "#;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sigstash.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_sample() {
        let (_dir, path) = write_config(SAMPLE);
        let config = load(Some(&path)).unwrap();

        assert_eq!(config.user, "operator");
        assert_eq!(config.storage.bucket, "signing-artifacts");
        assert_eq!(
            config.storage.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.storage.region, "us-east-1");
        assert_eq!(config.chains.len(), 1);
        assert_eq!(config.keys.len(), 1);
    }

    #[test]
    fn test_region_defaults_when_unset() {
        let (_dir, path) = write_config(
            r#"
            [storage]
            bucket = "b-bucket"
            access_key = "a"
            secret_key = "s"
            "#,
        );
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.storage.region, "us-east-1");
        assert!(config.storage.endpoint.is_none());
    }

    #[test]
    fn test_chain_and_key_lookup() {
        let (_dir, path) = write_config(SAMPLE);
        let config = load(Some(&path)).unwrap();

        let chain = config.chain("cosmoshub").unwrap();
        assert_eq!(chain.prefix, "cosmos");
        assert_eq!(chain.denom, "uatom");
        assert!(config.chain("nope").is_none());

        let key = config.key("validator1").unwrap();
        assert_eq!(key.local_name, "val1");
        assert!(config.key("nope").is_none());
    }

    #[test]
    fn test_missing_bucket_is_rejected() {
        let (_dir, path) = write_config(
            r#"
            [storage]
            bucket = ""
            access_key = "a"
            secret_key = "s"
            "#,
        );
        let result = load(Some(&path));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::LocalRead { .. })));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let (_dir, path) = write_config("storage = 12");
        let result = load(Some(&path));
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }
}
