use alloy::sol;

sol! {
    #[sol(rpc)]
    contract WorkerConfig {
        struct Config {
            bool acceptDebt;
            uint64 workFactor;
            uint64 killFactor;
            uint64 maxPriceDiff;
        }

        function setConfigs(address[] calldata workers, Config[] calldata configs) external;
        function workers(address worker) external view returns (bool acceptDebt, uint64 workFactor, uint64 killFactor, uint64 maxPriceDiff);
    }
}
