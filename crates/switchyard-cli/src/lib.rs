//! Switchyard command-line interface

pub mod commands;
pub mod logging;
pub mod output;
pub mod router;

pub use router::{Cli, CommandRouter, Commands};
