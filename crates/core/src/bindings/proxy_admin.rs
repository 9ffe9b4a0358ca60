use alloy::sol;

sol! {
    #[sol(rpc)]
    contract ProxyAdmin {
        function upgrade(address proxy, address implementation) external;
        function getProxyImplementation(address proxy) external view returns (address implementation);
        function getProxyAdmin(address proxy) external view returns (address admin);
    }
}
