use alloy::primitives::{Address, B256};
use alloy::providers::Provider;
use eyre::{Result, eyre};
use log::info;
use serde::{Deserialize, Serialize};

use crate::bindings::ownable::Ownable;
use crate::types::network_config::NetworkConfig;

/// One contract handed over to the timelock. `tx_hash` is `None` when the
/// timelock already owned it and no call was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipTransfer {
    pub contract: Address,
    pub previous_owner: Address,
    pub tx_hash: Option<B256>,
}

/// Transfer ownership of each listed contract to the timelock, one
/// confirmed transaction at a time. Contracts the timelock already owns
/// are skipped rather than re-submitted.
pub async fn transfer_to_timelock<P>(
    provider: P,
    config: &NetworkConfig,
    contracts: &[String],
) -> Result<Vec<OwnershipTransfer>>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let mut transfers = Vec::with_capacity(contracts.len());
    for contract in contracts {
        let contract = contract
            .parse::<Address>()
            .map_err(|_| eyre!("invalid contract address: {}", contract))?;

        let ownable = Ownable::new(contract, provider.clone());
        let owner = ownable.owner().call().await?.owner_;
        if owner == config.timelock {
            info!("{} is already owned by the timelock, skipping", contract);
            transfers.push(OwnershipTransfer {
                contract,
                previous_owner: owner,
                tx_hash: None,
            });
            continue;
        }

        let tx_hash = ownable
            .transferOwnership(config.timelock)
            .send()
            .await?
            .watch()
            .await?;
        info!("{}: {} -> timelock at {}", contract, owner, tx_hash);
        transfers.push(OwnershipTransfer {
            contract,
            previous_owner: owner,
            tx_hash: Some(tx_hash),
        });
    }

    Ok(transfers)
}
