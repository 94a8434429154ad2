// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Pluggable persistent storage drivers
//!
//! Sled is the default backend. Redb and an in-memory driver are available
//! through [`StorageType`].

pub mod memory;
#[cfg(feature = "redb-backend")]
pub mod redb;
#[cfg(feature = "sled-backend")]
pub mod sled;
pub mod traits;
pub mod types;

pub use memory::{MemoryDriver, MemoryTree};
#[cfg(feature = "redb-backend")]
pub use self::redb::{RedbDriver, RedbTree};
#[cfg(feature = "sled-backend")]
pub use self::sled::{SledDriver, SledTree};
pub use traits::{StorageDriver, StorageTree, TreeIter};
pub use types::{BatchOp, StorageDriverError, StorageResult, StorageType, WriteBatch};

use log::info;
use std::path::Path;

/// Open the backend selected by `storage_type` and return its `tree_name` tree
pub fn open_storage(
    storage_type: StorageType,
    path: &Path,
    tree_name: &str,
) -> StorageResult<Box<dyn StorageTree>> {
    info!(
        "Opening {} storage at {:?} (tree '{}')",
        storage_type, path, tree_name
    );

    match storage_type {
        #[cfg(feature = "sled-backend")]
        StorageType::Sled => open_with::<SledDriver>(path, tree_name),
        #[cfg(feature = "redb-backend")]
        StorageType::Redb => open_with::<RedbDriver>(path, tree_name),
        StorageType::Memory => open_with::<MemoryDriver>(path, tree_name),
        #[allow(unreachable_patterns)]
        other => Err(StorageDriverError::Unsupported(other)),
    }
}

fn open_with<D: StorageDriver>(
    path: &Path,
    tree_name: &str,
) -> StorageResult<Box<dyn StorageTree>> {
    let driver = D::open(path)?;
    Ok(Box::new(driver.open_tree(tree_name)?))
}
