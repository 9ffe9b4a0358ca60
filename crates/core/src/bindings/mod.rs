pub mod fair_launch;
pub mod medianizer;
pub mod ownable;
pub mod proxy_admin;
pub mod timelock;
pub mod vault_config;
pub mod worker_config;
