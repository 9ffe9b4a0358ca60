use alloy::providers::Provider;
use eyre::Result;
use log::info;
use serde_json::json;

use crate::bindings::fair_launch::FairLaunch;
use crate::timelock::queue::{QueueRequest, queue_transaction};
use crate::types::network_config::NetworkConfig;
use crate::types::timelock_transaction::TimelockTransaction;

/// Queue `addPool` on the fair-launch contract for a staking token from
/// the config. Returns the pool id the new pool will take.
pub async fn add_pool<P>(
    provider: P,
    config: &NetworkConfig,
    stake_token_symbol: &str,
    alloc_point: u64,
    eta: u64,
) -> Result<(u64, TimelockTransaction)>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let stake_token = config.token(stake_token_symbol)?;

    let fair_launch = FairLaunch::new(config.fair_launch, provider.clone());
    let next_pid = fair_launch.poolLength().call().await?.length.to::<u64>();
    info!(
        "queueing pool {} for {} ({} alloc points)",
        next_pid, stake_token_symbol, alloc_point
    );

    let request = QueueRequest::new(
        format!("add {} pool to fair launch", stake_token_symbol),
        config.fair_launch,
        "addPool(uint256,address,bool)",
        vec![
            "uint256".to_string(),
            "address".to_string(),
            "bool".to_string(),
        ],
        vec![
            json!(alloc_point.to_string()),
            json!(stake_token.to_string()),
            json!(false),
        ],
        eta,
    );
    let transaction = queue_transaction(provider, config.timelock, &request, None).await?;

    Ok((next_pid, transaction))
}
