// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for FriendGraph

use std::io::Write;
use std::sync::Arc;

use friendgraph::UserService;
use log::info;

use super::commands::StoreArgs;
use crate::routes::create_router;

/// Handle the serve command
///
/// Opens the store once and shares it with every request until the process
/// receives Ctrl-C.
pub fn handle_serve(
    host: String,
    port: u16,
    store: StoreArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = store.to_config();
    let service = Arc::new(
        UserService::open(&config)
            .map_err(|e| format!("Failed to open store at {:?}: {}", config.path, e))?,
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

        info!(
            "FriendGraph listening on {} ({} store at {:?})",
            addr, config.storage_type, config.path
        );

        axum::serve(listener, create_router(Arc::clone(&service)))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    service.flush()?;
    info!("FriendGraph stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Handle the drop command
pub fn handle_drop(store: StoreArgs, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !store.path.exists() {
        return Err(format!("Database not found at {:?}", store.path).into());
    }

    if !yes {
        print!("Delete every user in {:?}? [y/N] ", store.path);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    let service = UserService::open(&store.to_config())?;
    let count = service.user_count()?;
    service.drop_all()?;
    service.flush()?;

    println!("Dropped {} users from {:?}", count, store.path);
    Ok(())
}

/// Handle the version command
pub fn handle_version() {
    println!("friendgraph {}", env!("CARGO_PKG_VERSION"));
    println!("Storage backends: sled (default), redb, memory");
}
