use alloy::primitives::Address;
use alloy::providers::Provider;
use eyre::{Result, eyre};
use futures::future::try_join_all;
use log::info;
use serde_json::{Value, json};

use crate::bindings::{vault_config::VaultConfig, worker_config::WorkerConfig};
use crate::timelock::queue::{QueueRequest, queue_transaction};
use crate::types::network_config::NetworkConfig;
use crate::types::timelock_transaction::TimelockTransaction;

/// Risk parameters applied to every worker in the batch.
#[derive(Debug, Clone)]
pub struct WorkerFactors {
    pub accept_debt: bool,
    pub work_factor: u64,
    pub kill_factor: u64,
    pub max_price_diff: u64,
}

/// Queue the two calls that whitelist workers on a vault: risk factors on
/// the worker-config contract, then the worker set on the vault config.
/// Both go through the timelock with explicitly sequenced nonces.
pub async fn whitelist_workers<P>(
    provider: P,
    sender: Address,
    config: &NetworkConfig,
    vault_symbol: &str,
    worker_names: &[String],
    factors: &WorkerFactors,
    eta: u64,
) -> Result<Vec<TimelockTransaction>>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let vault = config.vault(vault_symbol)?;
    let workers = worker_names
        .iter()
        .map(|name| vault.worker(name))
        .collect::<Result<Vec<_>>>()?;

    let first = workers
        .first()
        .ok_or_else(|| eyre!("no workers given for vault {}", vault_symbol))?;
    let worker_config_addr = first.config;
    if workers.iter().any(|w| w.config != worker_config_addr) {
        return Err(eyre!(
            "workers in one batch must share a worker config contract"
        ));
    }

    // Current on-chain state, fetched in one wait-for-all batch. Any
    // single read failure fails the whole op.
    let current = try_join_all(workers.iter().map(|worker| {
        let provider = provider.clone();
        let vault_config_addr = vault.config;
        let worker_addr = worker.address;
        let worker_config_addr = worker.config;
        async move {
            let vault_config = VaultConfig::new(vault_config_addr, provider.clone());
            let worker_config = WorkerConfig::new(worker_config_addr, provider);
            let ok = vault_config.isWorker(worker_addr).call().await?.ok;
            let entry = worker_config.workers(worker_addr).call().await?;
            Ok::<_, eyre::Report>((ok, entry.acceptDebt))
        }
    }))
    .await?;

    for (worker, (ok, accept_debt)) in workers.iter().zip(&current) {
        info!(
            "{}: isWorker={} acceptDebt={}",
            worker.name, ok, accept_debt
        );
    }

    let addresses: Vec<Value> = workers
        .iter()
        .map(|w| json!(w.address.to_string()))
        .collect();
    let factor_tuples: Vec<Value> = workers
        .iter()
        .map(|_| {
            json!([
                factors.accept_debt,
                factors.work_factor.to_string(),
                factors.kill_factor.to_string(),
                factors.max_price_diff.to_string(),
            ])
        })
        .collect();
    let config_addresses: Vec<Value> = workers
        .iter()
        .map(|w| json!(w.config.to_string()))
        .collect();

    let set_configs = QueueRequest::new(
        format!(
            "set worker factors for [{}] on {}",
            worker_names.join(", "),
            vault.symbol
        ),
        worker_config_addr,
        "setConfigs(address[],(bool,uint64,uint64,uint64)[])",
        vec![
            "address[]".to_string(),
            "(bool,uint64,uint64,uint64)[]".to_string(),
        ],
        vec![Value::Array(addresses.clone()), Value::Array(factor_tuples)],
        eta,
    );
    let set_workers = QueueRequest::new(
        format!("whitelist [{}] on {} vault config", worker_names.join(", "), vault.symbol),
        vault.config,
        "setWorkers(address[],address[])",
        vec!["address[]".to_string(), "address[]".to_string()],
        vec![Value::Array(addresses), Value::Array(config_addresses)],
        eta,
    );

    // Two queue submissions in one run: sequence the nonces ourselves.
    let nonce = provider.get_transaction_count(sender).await?;
    let mut transactions = Vec::with_capacity(2);
    transactions
        .push(queue_transaction(provider.clone(), config.timelock, &set_configs, Some(nonce)).await?);
    transactions
        .push(queue_transaction(provider, config.timelock, &set_workers, Some(nonce + 1)).await?);

    Ok(transactions)
}
