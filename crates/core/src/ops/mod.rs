pub mod add_pool;
pub mod batch_execute;
pub mod deploy;
pub mod ownership;
pub mod price_feeds;
pub mod upgrade;
pub mod whitelist_workers;
