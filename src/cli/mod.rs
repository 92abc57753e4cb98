//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for slotsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// slotsync - doctor appointment slot synchronizer
#[derive(Parser, Debug)]
#[command(name = "slotsync")]
#[command(version, about, long_about = None)]
#[command(author = "slotsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "slotsync.toml", env = "SLOTSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SLOTSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize doctors and their slots from the doctors API
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show stored doctors, slot counts and error flags
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
