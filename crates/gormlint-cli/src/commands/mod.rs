//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_keys;
pub mod list_rules;
pub mod locate;
pub mod output;
