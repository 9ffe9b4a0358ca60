use alloy::primitives::{Address, B256, Bytes, U256, keccak256};
use alloy::providers::Provider;
use alloy::dyn_abi::DynSolValue;
use eyre::{Result, eyre};
use log::info;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bindings::timelock::Timelock;
use crate::timelock::command::ExecuteCommand;
use crate::types::timelock_transaction::TimelockTransaction;
use crate::utils::abi::{encode_params, signature_param_types};

/// One governance-delayed call, before submission.
#[derive(Debug, Clone)]
pub struct QueueRequest {
    pub description: String,
    pub target: Address,
    pub value: U256,
    pub signature: String,
    pub param_types: Vec<String>,
    pub param_values: Vec<Value>,
    pub eta: u64,
}

impl QueueRequest {
    pub fn new(
        description: impl Into<String>,
        target: Address,
        signature: impl Into<String>,
        param_types: Vec<String>,
        param_values: Vec<Value>,
        eta: u64,
    ) -> Self {
        Self {
            description: description.into(),
            target,
            value: U256::ZERO,
            signature: signature.into(),
            param_types,
            param_values,
            eta,
        }
    }

    /// Parse operator-supplied strings into a request. Placeholder values
    /// left unfilled fail here, before anything reaches the chain.
    pub fn from_args(
        description: &str,
        target: &str,
        value: &str,
        signature: &str,
        param_types: Vec<String>,
        params_json: &str,
        eta: u64,
    ) -> Result<Self> {
        let target = target
            .parse::<Address>()
            .map_err(|_| eyre!("invalid target address: {}", target))?;
        let value = value
            .parse::<U256>()
            .map_err(|_| eyre!("invalid call value: {}", value))?;
        let param_values: Vec<Value> = serde_json::from_str(params_json)
            .map_err(|e| eyre!("parameter values are not a JSON array: {}", e))?;

        let mut request = Self::new(description, target, signature, param_types, param_values, eta);
        request.value = value;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target == Address::ZERO {
            return Err(eyre!("target address is unset for: {}", self.description));
        }
        let signature_types = signature_param_types(&self.signature)?;
        if signature_types != self.param_types {
            return Err(eyre!(
                "signature {} does not match parameter types [{}]",
                self.signature,
                self.param_types.join(", ")
            ));
        }
        Ok(())
    }

    /// Encode the argument list once and wrap it as the replay command.
    /// `queue_transaction` submits these same bytes, so the queued call and
    /// the execute command cannot drift apart.
    pub fn execute_command(&self) -> Result<ExecuteCommand> {
        self.validate()?;
        Ok(ExecuteCommand {
            target: self.target,
            value: self.value.to_string(),
            signature: self.signature.clone(),
            data: encode_params(&self.param_types, &self.param_values)?,
            eta: self.eta,
        })
    }
}

/// Submit the queue call and return the transcript record.
pub async fn queue_transaction<P>(
    provider: P,
    timelock_addr: Address,
    request: &QueueRequest,
    nonce: Option<u64>,
) -> Result<TimelockTransaction>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let command = request.execute_command()?;
    let timelock = Timelock::new(timelock_addr, provider);

    // The eta must clear the on-chain minimum delay from now; the contract
    // would revert anyway, but this fails before the nonce is spent.
    let delay = timelock.delay().call().await?.delay_;
    let now = unix_now()?;
    if U256::from(request.eta) < U256::from(now) + delay {
        return Err(eyre!(
            "eta {} does not clear the timelock delay of {}s from now ({})",
            request.eta,
            delay,
            now
        ));
    }

    let mut call = timelock.queueTransaction(
        request.target,
        request.value,
        request.signature.clone(),
        command.data.clone(),
        U256::from(request.eta),
    );
    if let Some(nonce) = nonce {
        call = call.nonce(nonce);
    }
    let queued_tx_hash = call.send().await?.watch().await?;
    info!("queued `{}` at {}", request.description, queued_tx_hash);

    Ok(TimelockTransaction {
        description: request.description.clone(),
        queued_tx_hash,
        execute_command: command.render(),
        target: request.target,
        value: request.value.to_string(),
        signature: request.signature.clone(),
        param_types: request.param_types.clone(),
        param_values: request.param_values.clone(),
        eta: request.eta,
    })
}

/// The hash the timelock stores for a queued action:
/// `keccak256(abi.encode(target, value, signature, data, eta))`.
pub fn action_hash(target: Address, value: U256, signature: &str, data: &Bytes, eta: u64) -> B256 {
    let encoded = DynSolValue::Tuple(vec![
        DynSolValue::Address(target),
        DynSolValue::Uint(value, 256),
        DynSolValue::String(signature.to_string()),
        DynSolValue::Bytes(data.to_vec()),
        DynSolValue::Uint(U256::from(eta), 256),
    ])
    .abi_encode_params();
    keccak256(encoded)
}

/// Replay a queued action. Verifies the action is actually queued first so
/// a mistyped parameter surfaces as a descriptive error instead of an
/// on-chain revert.
pub async fn execute_transaction<P>(
    provider: P,
    timelock_addr: Address,
    target: Address,
    value: U256,
    signature: &str,
    data: Bytes,
    eta: u64,
) -> Result<B256>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let timelock = Timelock::new(timelock_addr, provider);

    let hash = action_hash(target, value, signature, &data, eta);
    let queued = timelock.queuedTransactions(hash).call().await?.queued;
    if !queued {
        return Err(eyre!(
            "action {} with hash {} is not queued on the timelock",
            signature,
            hash
        ));
    }

    let mut call = timelock.executeTransaction(
        target,
        value,
        signature.to_string(),
        data,
        U256::from(eta),
    );
    if value > U256::ZERO {
        call = call.value(value);
    }
    let tx_hash = call.send().await?.watch().await?;
    info!("executed `{}` at {}", signature, tx_hash);

    Ok(tx_hash)
}

pub async fn execute_from_args<P>(
    provider: P,
    timelock_addr: Address,
    target: &str,
    value: &str,
    signature: &str,
    data: &str,
    eta: u64,
) -> Result<B256>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let target = target
        .parse::<Address>()
        .map_err(|_| eyre!("invalid target address: {}", target))?;
    let value = value
        .parse::<U256>()
        .map_err(|_| eyre!("invalid call value: {}", value))?;
    let data = data
        .parse::<Bytes>()
        .map_err(|_| eyre!("invalid calldata hex: {}", data))?;

    execute_transaction(provider, timelock_addr, target, value, signature, data, eta).await
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::abi::decode_params;
    use alloy::primitives::address;
    use serde_json::json;

    #[test]
    fn execute_command_round_trips_the_queued_parameters() {
        let request = QueueRequest::new(
            "adjust max kill bps",
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            "setMaxKillBps(uint256)",
            vec!["uint256".to_string()],
            vec![json!("500")],
            1626321600,
        );

        let command = request.execute_command().unwrap();
        let parsed = ExecuteCommand::parse(&command.render()).unwrap();
        assert_eq!(parsed, command);

        assert_eq!(
            parsed.target,
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01")
        );
        assert_eq!(parsed.value, "0");
        assert_eq!(parsed.signature, "setMaxKillBps(uint256)");
        assert_eq!(parsed.eta, 1626321600);

        let expected: Bytes =
            "0x00000000000000000000000000000000000000000000000000000000000001f4"
                .parse()
                .unwrap();
        assert_eq!(parsed.data, expected);

        let decoded = decode_params(&["uint256".to_string()], &parsed.data).unwrap();
        assert_eq!(decoded, vec![DynSolValue::Uint(U256::from(500u64), 256)]);
    }

    #[test]
    fn rejects_placeholder_targets() {
        let request = QueueRequest::new(
            "left blank by the template",
            Address::ZERO,
            "setMaxKillBps(uint256)",
            vec!["uint256".to_string()],
            vec![json!("500")],
            1626321600,
        );
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("target address is unset"));
    }

    #[test]
    fn rejects_signature_type_list_mismatch() {
        let request = QueueRequest::new(
            "mismatched",
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            "setMaxKillBps(uint256)",
            vec!["uint64".to_string()],
            vec![json!("500")],
            1626321600,
        );
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("does not match parameter types"));
    }

    #[test]
    fn from_args_parses_and_validates() {
        let request = QueueRequest::from_args(
            "adjust max kill bps",
            "0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01",
            "0",
            "setMaxKillBps(uint256)",
            vec!["uint256".to_string()],
            r#"["500"]"#,
            1626321600,
        )
        .unwrap();
        assert_eq!(request.value, U256::ZERO);
        assert_eq!(request.param_values, vec![json!("500")]);

        assert!(
            QueueRequest::from_args(
                "bad target",
                "0x123",
                "0",
                "setMaxKillBps(uint256)",
                vec!["uint256".to_string()],
                r#"["500"]"#,
                1626321600,
            )
            .is_err()
        );
    }

    #[test]
    fn action_hash_is_stable() {
        let data: Bytes = "0x00000000000000000000000000000000000000000000000000000000000001f4"
            .parse()
            .unwrap();
        let a = action_hash(
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            U256::ZERO,
            "setMaxKillBps(uint256)",
            &data,
            1626321600,
        );
        let b = action_hash(
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            U256::ZERO,
            "setMaxKillBps(uint256)",
            &data,
            1626321600,
        );
        assert_eq!(a, b);

        let c = action_hash(
            address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            U256::ZERO,
            "setMaxKillBps(uint256)",
            &data,
            1626321601,
        );
        assert_ne!(a, c);
    }
}
