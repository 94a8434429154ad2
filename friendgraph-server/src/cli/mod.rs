// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for FriendGraph
//!
//! Provides the command-line interface for running the HTTP server and
//! administering the user store.

pub mod commands;
pub mod handlers;

pub use commands::{Cli, Commands, LogLevel, StoreArgs};
pub use handlers::{handle_drop, handle_serve, handle_version};
