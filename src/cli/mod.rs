//! Command-line interface for book-isbn.
//!
//! This module parses flags, merges them with the config file and runs the
//! wish list lookup or one of its subcommands.

mod commands;

pub use commands::{Cli, Commands, Settings, run_command};
