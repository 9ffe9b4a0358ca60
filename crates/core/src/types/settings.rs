use eyre::{Result, eyre};
use std::path::PathBuf;
use std::{env, fs};
use toml::Value;

/// Wrapper around the ambient `config.toml`: RPC endpoints, per-network
/// config snapshot paths, and the artifact directory.
pub struct Settings {
    raw_config: Value,
}

impl Settings {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    pub fn from_file(path: Option<&str>) -> Result<Self> {
        dotenv::dotenv().ok();

        let config_content = if let Some(p) = path {
            fs::read_to_string(p).map_err(|e| eyre!("failed to read {}: {}", p, e))?
        } else {
            fs::read_to_string("config.toml")
                .map_err(|e| eyre!("failed to read config.toml: {}", e))?
        };
        let raw_config: Value = config_content.parse::<Value>()?;

        Ok(Self { raw_config })
    }

    /// Path of the per-network JSON snapshot. Unknown network names are fatal.
    pub fn network_config_path(&self, network: &str) -> Result<String> {
        let path = self
            .raw_config
            .get("networks")
            .and_then(|n| n.get(network))
            .and_then(|n| n.get("config"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("unknown network: {}", network))?;

        Ok(path.to_string())
    }

    pub fn rpc_url(&self, network: &str) -> Result<String> {
        let url_str = self
            .raw_config
            .get("networks")
            .and_then(|n| n.get(network))
            .and_then(|n| n.get("rpc"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("rpc endpoint not found for network: {}", network))?;

        if url_str.starts_with("env:") {
            let env_var = &url_str[4..];
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        } else {
            Ok(url_str.to_string())
        }
    }

    pub fn artifact_dir(&self) -> PathBuf {
        self.raw_config
            .get("artifacts")
            .and_then(|a| a.get("dir"))
            .and_then(|v| v.as_str())
            .unwrap_or("artifacts")
            .into()
    }
}
