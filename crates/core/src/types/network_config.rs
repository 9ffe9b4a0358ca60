use alloy::primitives::Address;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

use crate::types::settings::Settings;

/// Per-network snapshot of deployed contract addresses and vault/worker
/// metadata. Loaded once per run and treated as read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub timelock: Address,
    pub proxy_admin: Address,
    pub fair_launch: Address,
    pub shared_strategies: SharedStrategies,
    pub oracle: OracleConfig,
    pub tokens: BTreeMap<String, Address>,
    pub vaults: Vec<VaultEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedStrategies {
    pub add_base_token_only: Address,
    pub liquidate: Address,
    pub withdraw_minimize_trading: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub medianizer: Address,
    pub chainlink: Address,
    pub simple_feed: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    pub name: String,
    pub symbol: String,
    pub address: Address,
    pub config: Address,
    pub base_token: Address,
    pub workers: Vec<WorkerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerEntry {
    pub name: String,
    pub address: Address,
    pub config: Address,
    pub pool_id: u64,
    pub staking_token: Address,
    pub strategies: BTreeMap<String, Address>,
}

impl NetworkConfig {
    /// Resolve a network name through `config.toml` and load its snapshot.
    pub fn load(settings: &Settings, network: &str) -> Result<Self> {
        let path = settings.network_config_path(network)?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| eyre!("failed to read {}: {}", path, e))?;
        serde_json::from_str(&content).map_err(|e| eyre!("malformed network config {}: {}", path, e))
    }

    pub fn token(&self, symbol: &str) -> Result<Address> {
        self.tokens
            .get(symbol)
            .copied()
            .ok_or_else(|| eyre!("token {} not found in network config", symbol))
    }

    pub fn vault(&self, symbol: &str) -> Result<&VaultEntry> {
        self.vaults
            .iter()
            .find(|v| v.symbol == symbol)
            .ok_or_else(|| eyre!("vault {} not found in network config", symbol))
    }
}

impl VaultEntry {
    pub fn worker(&self, name: &str) -> Result<&WorkerEntry> {
        self.workers
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| eyre!("worker {} not found under vault {}", name, self.symbol))
    }
}

impl WorkerEntry {
    pub fn strategy(&self, name: &str) -> Result<Address> {
        self.strategies
            .get(name)
            .copied()
            .ok_or_else(|| eyre!("strategy {} not found for worker {}", name, self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const SAMPLE: &str = r#"{
        "timelock": "0x2d5408f2287bf9f9b05404794459a846651d0a59",
        "proxy_admin": "0x5379f32c8d5f663eacb61eef63f722950294f452",
        "fair_launch": "0xa625ab01b08ce023b2a342dbb12a16f2c8489a8f",
        "shared_strategies": {
            "add_base_token_only": "0x3fc149995021f1d7aec54d015dad3c7abc952bf0",
            "liquidate": "0xc7c025aa69f4b525e3f9f5186b524492ee1c86bb",
            "withdraw_minimize_trading": "0x9da5d593235a4a1a905f4c4bbaf35e935c0c4479"
        },
        "oracle": {
            "medianizer": "0x166f56f2eda9817cab77118ae4fcaa0002a17ec7",
            "chainlink": "0x634902128543b25265da350e2d961c7ff540fc71",
            "simple_feed": "0x0b53e4b0c8c03d6407b0b99c7b1e2bbbf0b98d9d"
        },
        "tokens": {
            "WBNB": "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c",
            "BUSD": "0xe9e7cea3dedca5984780bafc599bd69add087d56"
        },
        "vaults": [
            {
                "name": "Interest Bearing WBNB",
                "symbol": "ibWBNB",
                "address": "0xd7d069493685a581d27824fc46eda46b7efc0063",
                "config": "0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01",
                "base_token": "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c",
                "workers": [
                    {
                        "name": "BUSD-WBNB Worker",
                        "address": "0x7affab8b3c25816891b58ed2a88ddef5ecf25c77",
                        "config": "0xadab83f9b0a31b0a2131cda1d6a720ffa9be48c1",
                        "pool_id": 2,
                        "staking_token": "0x58f876857a02d6762e0101bb5c46a8c1ed44dc16",
                        "strategies": {
                            "add_two_sides": "0x74d3b7d4a7c3b1e5d3f68e9957f554cbf0dd2fcf"
                        }
                    }
                ]
            }
        ]
    }"#;

    fn sample() -> NetworkConfig {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn resolves_addresses() {
        let config = sample();
        assert_eq!(
            config.token("BUSD").unwrap(),
            address!("0xe9e7cea3dedca5984780bafc599bd69add087d56")
        );
        let vault = config.vault("ibWBNB").unwrap();
        let worker = vault.worker("BUSD-WBNB Worker").unwrap();
        assert_eq!(worker.pool_id, 2);
        assert_eq!(
            worker.strategy("add_two_sides").unwrap(),
            address!("0x74d3b7d4a7c3b1e5d3f68e9957f554cbf0dd2fcf")
        );
    }

    #[test]
    fn missing_entries_are_descriptive_errors() {
        let config = sample();
        let err = config.token("DOGE").unwrap_err();
        assert!(err.to_string().contains("DOGE"));

        let err = config.vault("ibALPACA").unwrap_err();
        assert!(err.to_string().contains("ibALPACA"));

        let vault = config.vault("ibWBNB").unwrap();
        let err = vault.worker("USDT-WBNB Worker").unwrap_err();
        assert!(err.to_string().contains("USDT-WBNB Worker"));
        assert!(err.to_string().contains("ibWBNB"));
    }
}
