//! # helpdesk-cli
//!
//! Command-line front end: argument parsing, principal from flags, command dispatch.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, KeyArgs};
pub use commands::{render_inbox, run};
