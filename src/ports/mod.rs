//! Port traits: the narrow seams between the core and the outside world.

pub mod alert_port;
pub mod config_port;
pub mod data_port;
pub mod summary_port;
pub mod trade_port;
