use alloy::primitives::Address;
use alloy::providers::Provider;
use eyre::{Result, eyre};
use log::info;
use serde_json::json;

use crate::bindings::proxy_admin::ProxyAdmin;
use crate::timelock::queue::{QueueRequest, queue_transaction};
use crate::types::network_config::NetworkConfig;
use crate::types::timelock_transaction::TimelockTransaction;

/// Queue a proxy upgrade through the timelock-owned proxy admin.
pub async fn queue_upgrade<P>(
    provider: P,
    config: &NetworkConfig,
    proxy: &str,
    implementation: &str,
    description: &str,
    eta: u64,
) -> Result<TimelockTransaction>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let proxy = proxy
        .parse::<Address>()
        .map_err(|_| eyre!("invalid proxy address: {}", proxy))?;
    let implementation = implementation
        .parse::<Address>()
        .map_err(|_| eyre!("invalid implementation address: {}", implementation))?;

    let proxy_admin = ProxyAdmin::new(config.proxy_admin, provider.clone());
    let current = proxy_admin
        .getProxyImplementation(proxy)
        .call()
        .await?
        .implementation;
    if current == implementation {
        return Err(eyre!(
            "proxy {} is already at implementation {}",
            proxy,
            implementation
        ));
    }
    info!("upgrade {}: {} -> {}", proxy, current, implementation);

    let request = QueueRequest::new(
        description,
        config.proxy_admin,
        "upgrade(address,address)",
        vec!["address".to_string(), "address".to_string()],
        vec![json!(proxy.to_string()), json!(implementation.to_string())],
        eta,
    );

    queue_transaction(provider, config.timelock, &request, None).await
}
