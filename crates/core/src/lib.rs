//! Operational tooling for the lending protocol: network config resolution,
//! the timelock queue/execute builder, artifact persistence, and the admin
//! operations the CLI drives.

pub mod bindings;
pub mod ops;
pub mod timelock;
pub mod types;
pub mod utils;
