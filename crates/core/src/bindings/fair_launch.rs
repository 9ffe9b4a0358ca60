use alloy::sol;

sol! {
    #[sol(rpc)]
    contract FairLaunch {
        function addPool(uint256 allocPoint, address stakeToken, bool withUpdate) external;
        function setPool(uint256 pid, uint256 allocPoint, bool withUpdate) external;
        function poolLength() external view returns (uint256 length);
    }
}
