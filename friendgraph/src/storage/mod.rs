// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! User record storage
//!
//! This module provides:
//! - The `User` record type and its binary codec
//! - User id generation
//! - Pluggable key-value backends (sled, redb, memory)
//! - The `UserStore` adapter the service talks to

pub mod codec;
pub mod id;
pub mod persistent;
pub mod types;
pub mod user_store;

pub use types::User;
pub use user_store::{CommitSet, UserStore};
// Only expose what callers need to pick and drive a backend
pub use persistent::{open_storage, StorageDriver, StorageTree, StorageType, WriteBatch};
