//! Port traits for the external collaborators of the core.

pub mod config_port;
pub mod price_port;
pub mod report_port;
pub mod transaction_port;
