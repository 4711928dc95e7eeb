//! CLI module for nextdrill - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
