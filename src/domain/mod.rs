//! Core domain types and logic.

pub mod trade;
pub mod ledger;
pub mod instrument;
pub mod index;
pub mod seed;
pub mod random_trade;
pub mod config_validation;
pub mod error;
