// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::StorageType;

/// Default on-disk location of the user table
pub const DEFAULT_DB_PATH: &str = "users.db";

/// Default tree (table) holding user records
pub const DEFAULT_TREE_NAME: &str = "users";

/// Where and how the user table is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendGraphConfig {
    /// Database directory (sled) or file (redb); ignored by the memory backend
    pub path: PathBuf,
    pub storage_type: StorageType,
    pub tree_name: String,
}

impl Default for FriendGraphConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            storage_type: StorageType::default(),
            tree_name: DEFAULT_TREE_NAME.to_string(),
        }
    }
}

impl FriendGraphConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::default().with_storage_type(StorageType::Memory)
    }

    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = storage_type;
        self
    }

    pub fn with_tree_name(mut self, tree_name: impl Into<String>) -> Self {
        self.tree_name = tree_name.into();
        self
    }
}
