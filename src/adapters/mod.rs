//! Concrete adapter implementations for ports.

pub mod builtin_seed;
pub mod csv_adapter;
pub mod file_config_adapter;
