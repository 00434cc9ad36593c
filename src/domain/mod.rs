//! Core domain types and logic.

pub mod price;
pub mod transaction;
pub mod returns;
pub mod position;
pub mod portfolio;
pub mod benchmark;
pub mod valuation;
pub mod config_validation;
pub mod error;
