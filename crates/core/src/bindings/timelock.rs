use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Timelock {
        function queueTransaction(address target, uint256 value, string memory signature, bytes memory data, uint256 eta) public returns (bytes32);
        function executeTransaction(address target, uint256 value, string memory signature, bytes memory data, uint256 eta) public payable returns (bytes memory);
        function cancelTransaction(address target, uint256 value, string memory signature, bytes memory data, uint256 eta) public;
        function queuedTransactions(bytes32 hash) public view returns (bool queued);
        function delay() public view returns (uint256 delay_);
        function admin() public view returns (address admin_);
    }
}
