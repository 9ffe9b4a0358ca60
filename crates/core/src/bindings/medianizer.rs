use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Medianizer {
        function setPrimarySources(address token0, address token1, uint256 maxPriceDeviation, address[] calldata sources) external;
        function getPrice(address token0, address token1) external view returns (uint256 price, uint256 lastUpdate);
    }
}
