use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use eyre::{Result, eyre};
use log::{info, warn};
use serde::Serialize;
use std::future::Future;

use crate::timelock::command::ExecuteCommand;
use crate::timelock::queue::execute_transaction;
use crate::types::timelock_transaction::{FailedTransaction, TimelockTransaction};

/// Outcome of replaying one artifact. Failures are kept for a follow-up
/// artifact instead of aborting the remaining items.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub executed: Vec<TimelockTransaction>,
    pub failed: Vec<FailedTransaction>,
}

/// Replay every queued transaction in an artifact against the timelock.
/// Each record is executed from the calldata embedded in its own execute
/// command, so the replay submits exactly what was queued.
pub async fn execute_batch<P>(
    provider: P,
    timelock: Address,
    transactions: Vec<TimelockTransaction>,
) -> BatchReport
where
    P: Provider + Clone + Send + Sync + 'static,
{
    replay_batch(transactions, |transaction| {
        let provider = provider.clone();
        async move {
            let command = ExecuteCommand::parse(&transaction.execute_command)?;
            let value = command
                .value
                .parse::<U256>()
                .map_err(|_| eyre!("invalid call value: {}", command.value))?;
            execute_transaction(
                provider,
                timelock,
                command.target,
                value,
                &command.signature,
                command.data,
                command.eta,
            )
            .await
        }
    })
    .await
}

/// Drive a batch one item at a time, accumulating per-item failures. A
/// failing item never aborts the items after it.
pub async fn replay_batch<F, Fut>(transactions: Vec<TimelockTransaction>, mut execute: F) -> BatchReport
where
    F: FnMut(TimelockTransaction) -> Fut,
    Fut: Future<Output = Result<B256>>,
{
    let mut report = BatchReport::default();
    for transaction in transactions {
        match execute(transaction.clone()).await {
            Ok(tx_hash) => {
                info!("executed `{}` at {}", transaction.description, tx_hash);
                report.executed.push(transaction);
            }
            Err(e) => {
                warn!("failed `{}`: {}", transaction.description, e);
                report.failed.push(FailedTransaction {
                    transaction,
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serde_json::json;

    fn record(description: &str) -> TimelockTransaction {
        TimelockTransaction {
            description: description.to_string(),
            queued_tx_hash: B256::repeat_byte(0x22),
            execute_command: "foreman-cli execute --target 0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01 --value 0 --signature 'setMaxKillBps(uint256)' --data 0x00000000000000000000000000000000000000000000000000000000000001f4 --eta 1626321600".to_string(),
            target: address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            value: "0".to_string(),
            signature: "setMaxKillBps(uint256)".to_string(),
            param_types: vec!["uint256".to_string()],
            param_values: vec![json!("500")],
            eta: 1626321600,
        }
    }

    #[tokio::test]
    async fn failures_do_not_abort_the_batch() {
        let transactions = vec![
            record("first"),
            record("second fails"),
            record("third"),
            record("fourth fails"),
        ];

        let report = replay_batch(transactions, |transaction| async move {
            if transaction.description.contains("fails") {
                Err(eyre!("simulated revert"))
            } else {
                Ok(B256::repeat_byte(0x33))
            }
        })
        .await;

        let executed: Vec<_> = report
            .executed
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(executed, vec!["first", "third"]);

        let failed: Vec<_> = report
            .failed
            .iter()
            .map(|f| f.transaction.description.as_str())
            .collect();
        assert_eq!(failed, vec!["second fails", "fourth fails"]);
        assert!(report.failed.iter().all(|f| f.error == "simulated revert"));
    }

    #[tokio::test]
    async fn unparseable_commands_land_in_the_failure_list() {
        let mut garbled = record("garbled command");
        garbled.execute_command = "foreman-cli execute --target not-an-address".to_string();

        let report = replay_batch(vec![garbled], |transaction| async move {
            ExecuteCommand::parse(&transaction.execute_command)?;
            Ok(B256::ZERO)
        })
        .await;

        assert!(report.executed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].error.contains("invalid target address"));
    }
}
