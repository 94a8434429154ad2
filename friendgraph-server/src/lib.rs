// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! HTTP binding layer for FriendGraph
//!
//! Binds JSON requests to the service's request structs, runs them and maps
//! the outcome to status codes.

pub mod cli;
pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{create_router, AppState};
