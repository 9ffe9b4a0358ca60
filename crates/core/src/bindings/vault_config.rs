use alloy::sol;

sol! {
    #[sol(rpc)]
    contract VaultConfig {
        function setWorkers(address[] calldata workers, address[] calldata workerConfigs) external;
        function isWorker(address worker) external view returns (bool ok);
        function minDebtSize() external view returns (uint256 size);
    }
}
