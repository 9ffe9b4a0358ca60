use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use eyre::{Result, eyre};
use log::info;
use serde_json::Value;
use std::fs;

use crate::utils::abi::encode_params;

/// Assemble deployable creation code: the compiled bytecode with the
/// ABI-encoded constructor arguments appended. Constructor arguments go
/// through the same encoder as every queued call.
pub fn creation_code(bytecode_hex: &str, types: &[String], values: &[Value]) -> Result<Bytes> {
    let cleaned: String = bytecode_hex.split_whitespace().collect();
    let bytecode = hex::decode(cleaned.trim_start_matches("0x"))
        .map_err(|_| eyre!("creation bytecode is not valid hex"))?;
    if bytecode.is_empty() {
        return Err(eyre!("creation bytecode is empty"));
    }

    let mut code = bytecode;
    code.extend_from_slice(&encode_params(types, values)?);
    Ok(Bytes::from(code))
}

/// Deploy a contract from a creation-bytecode hex file and report the
/// created address. A receipt without a contract address is an error.
pub async fn deploy_contract<P>(
    provider: P,
    name: &str,
    bytecode_path: &str,
    constructor_types: &[String],
    params_json: &str,
) -> Result<(Address, B256)>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let bytecode_hex = fs::read_to_string(bytecode_path)
        .map_err(|e| eyre!("failed to read bytecode file {}: {}", bytecode_path, e))?;
    let constructor_values: Vec<Value> = serde_json::from_str(params_json)
        .map_err(|e| eyre!("constructor values are not a JSON array: {}", e))?;

    let code = creation_code(&bytecode_hex, constructor_types, &constructor_values)?;
    info!("deploying {} ({} bytes of creation code)", name, code.len());

    let request = TransactionRequest::default().with_deploy_code(code);
    let receipt = provider
        .send_transaction(request)
        .await?
        .get_receipt()
        .await?;

    let address = receipt
        .contract_address
        .ok_or_else(|| eyre!("deployment receipt for {} carries no contract address", name))?;
    info!("deployed {} at {}", name, address);

    Ok((address, receipt.transaction_hash))
}
