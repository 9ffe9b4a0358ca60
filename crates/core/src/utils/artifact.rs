use eyre::{Result, eyre};
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Persist a record slice to `<dir>/<prefix>_<unix-ts>.json`. The chain is
/// the source of truth; losing an artifact loses only the replay shortcut.
pub fn write_artifact<T: Serialize>(dir: &Path, prefix: &str, records: &[T]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| eyre!("failed to create artifact dir {}: {}", dir.display(), e))?;

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let path = dir.join(format!("{}_{}.json", prefix, timestamp));
    fs::write(&path, serde_json::to_string_pretty(records)?)
        .map_err(|e| eyre!("failed to write artifact {}: {}", path.display(), e))?;

    info!("wrote {} record(s) to {}", records.len(), path.display());
    Ok(path)
}

pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| eyre!("failed to read artifact {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| eyre!("malformed artifact {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timelock_transaction::TimelockTransaction;
    use alloy::primitives::{B256, address};
    use serde_json::json;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("foreman-artifact-{}", Uuid::new_v4()))
    }

    fn sample_record() -> TimelockTransaction {
        TimelockTransaction {
            description: "adjust max kill bps".to_string(),
            queued_tx_hash: B256::repeat_byte(0x11),
            execute_command: "foreman-cli execute --target 0x53DBB71303ad0F9AFa184B8f7147F9f12Bb5Dc01 --value 0 --signature 'setMaxKillBps(uint256)' --data 0x00000000000000000000000000000000000000000000000000000000000001f4 --eta 1626321600".to_string(),
            target: address!("0x53dbb71303ad0f9afa184b8f7147f9f12bb5dc01"),
            value: "0".to_string(),
            signature: "setMaxKillBps(uint256)".to_string(),
            param_types: vec!["uint256".to_string()],
            param_values: vec![json!("500")],
            eta: 1626321600,
        }
    }

    #[test]
    fn round_trips_records() {
        let dir = temp_dir();
        let records = vec![sample_record()];

        let path = write_artifact(&dir, "timelock", &records).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("timelock_"));

        let restored: Vec<TimelockTransaction> = read_artifact(&path).unwrap();
        assert_eq!(restored, records);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_or_malformed_artifacts_fail() {
        let dir = temp_dir();
        let missing = dir.join("nope.json");
        assert!(read_artifact::<TimelockTransaction>(&missing).is_err());

        fs::create_dir_all(&dir).unwrap();
        let garbled = dir.join("garbled.json");
        fs::write(&garbled, "{not json").unwrap();
        let err = read_artifact::<TimelockTransaction>(&garbled).unwrap_err();
        assert!(err.to_string().contains("malformed artifact"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
