use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transcript of one queued governance call. The `execute_command` string
/// embeds the exact calldata that was submitted in the queue call, so the
/// record can be replayed verbatim once the eta has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelockTransaction {
    pub description: String,
    pub queued_tx_hash: B256,
    pub execute_command: String,
    pub target: Address,
    /// Call value as a decimal string, typically "0".
    pub value: String,
    pub signature: String,
    pub param_types: Vec<String>,
    pub param_values: Vec<Value>,
    pub eta: u64,
}

/// A batch-replay casualty, persisted for manual follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedTransaction {
    pub transaction: TimelockTransaction,
    pub error: String,
}
