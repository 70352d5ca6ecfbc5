//! ssstocks — a super simple stock market.
//!
//! Domain logic in [`domain`], port traits in [`ports`], concrete
//! implementations in [`adapters`]. The interactive command loop lives in
//! [`shell`] and the command-line entry point in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod shell;
pub mod cli;
