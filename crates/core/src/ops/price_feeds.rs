use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use eyre::{Result, eyre};
use log::info;

use crate::bindings::medianizer::Medianizer;
use crate::types::network_config::NetworkConfig;

/// Point the oracle medianizer at a new set of primary price sources for a
/// token pair. This is a direct owner call, not a timelock queue.
pub async fn set_price_sources<P>(
    provider: P,
    config: &NetworkConfig,
    token0_symbol: &str,
    token1_symbol: &str,
    max_price_deviation: &str,
    sources: &[String],
) -> Result<B256>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let token0 = config.token(token0_symbol)?;
    let token1 = config.token(token1_symbol)?;

    let max_price_deviation = max_price_deviation
        .parse::<U256>()
        .map_err(|_| eyre!("invalid max price deviation: {}", max_price_deviation))?;

    if sources.is_empty() {
        return Err(eyre!(
            "no price sources given for {}/{}",
            token0_symbol,
            token1_symbol
        ));
    }
    let sources = sources
        .iter()
        .map(|s| {
            s.parse::<Address>()
                .map_err(|_| eyre!("invalid price source address: {}", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let medianizer = Medianizer::new(config.oracle.medianizer, provider);
    let tx_hash = medianizer
        .setPrimarySources(token0, token1, max_price_deviation, sources)
        .send()
        .await?
        .watch()
        .await?;
    info!(
        "set {}/{} primary sources at {}",
        token0_symbol, token1_symbol, tx_hash
    );

    Ok(tx_hash)
}
