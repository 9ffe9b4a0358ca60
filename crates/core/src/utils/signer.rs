use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use dotenv::dotenv;
use eyre::{Result, eyre};
use std::env;

/// Build a wallet-backed provider from `DEPLOYER_PRIVATE_KEY`, returning
/// the provider together with the sender address for explicit nonce
/// management.
pub async fn connect(rpc_url: &str) -> Result<(impl Provider + Clone + Send + Sync + 'static, Address)> {
    dotenv().ok();

    let key = env::var("DEPLOYER_PRIVATE_KEY")
        .map_err(|_| eyre!("Environment variable DEPLOYER_PRIVATE_KEY not set"))?;
    let signer: PrivateKeySigner = key
        .trim()
        .parse()
        .map_err(|_| eyre!("DEPLOYER_PRIVATE_KEY is not a valid private key"))?;
    let sender = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_builtin(rpc_url)
        .await?;

    Ok((provider, sender))
}
