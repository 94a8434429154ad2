// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for FriendGraph

use clap::{Parser, Subcommand, ValueEnum};
use friendgraph::{FriendGraphConfig, StorageType};
use std::path::PathBuf;
use std::str::FromStr;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// FriendGraph CLI - social graph server
#[derive(Parser)]
#[command(name = "friendgraph")]
#[command(about = "FriendGraph - A minimal social graph service")]
#[command(version)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Explicit level from the flags, if any; `RUST_LOG` applies otherwise
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        match (self.log_level, self.verbose) {
            (Some(level), _) => Some(level.to_level_filter()),
            (None, true) => Some(log::LevelFilter::Debug),
            (None, false) => None,
        }
    }
}

/// Where the user table lives
#[derive(clap::Args, Clone, Debug)]
pub struct StoreArgs {
    /// Database path
    #[arg(long, default_value = friendgraph::config::DEFAULT_DB_PATH)]
    pub path: PathBuf,

    /// Storage backend (sled, redb, memory)
    #[arg(short, long, value_parser = StorageType::from_str, default_value_t = StorageType::Sled)]
    pub storage: StorageType,
}

impl StoreArgs {
    pub fn to_config(&self) -> FriendGraphConfig {
        FriendGraphConfig::new(&self.path).with_storage_type(self.storage)
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 3333)]
        port: u16,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Delete every user in the store
    Drop {
        #[command(flatten)]
        store: StoreArgs,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },
}
