// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! FriendGraph server binary

use clap::Parser;
use friendgraph_server::cli::{handle_drop, handle_serve, handle_version, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cli.level_filter() {
        builder.filter_level(level);
    }
    builder.init();

    let result = match cli.command {
        Commands::Version => {
            handle_version();
            Ok(())
        }
        Commands::Serve { host, port, store } => handle_serve(host, port, store),
        Commands::Drop { store, yes } => handle_drop(store, yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
