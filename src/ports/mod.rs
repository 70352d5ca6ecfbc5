//! Port traits implemented by [`crate::adapters`].

pub mod config_port;
pub mod instrument_port;
