use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Ownable {
        function owner() external view returns (address owner_);
        function transferOwnership(address newOwner) external;
    }
}
