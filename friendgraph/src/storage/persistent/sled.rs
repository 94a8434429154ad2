// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage driver implementation

use super::traits::{StorageDriver, StorageTree, TreeIter};
use super::types::{BatchOp, StorageDriverError, StorageResult, StorageType, WriteBatch};
use std::path::Path;

/// Name sled gives the tree every database starts with
const SLED_DEFAULT_TREE: &[u8] = b"__sled__default";

/// Sled driver implementation
pub struct SledDriver {
    db: sled::Db,
}

/// Sled tree wrapper
///
/// Single-key operations on a sled tree are atomic on their own, so no
/// explicit transaction is opened for them.
pub struct SledTree {
    tree: sled::Tree,
}

impl StorageTree for SledTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.tree
            .insert(key, value)
            .map_err(StorageDriverError::backend)?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let value = self.tree.get(key).map_err(StorageDriverError::backend)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.tree.remove(key).map_err(StorageDriverError::backend)?;
        Ok(())
    }

    fn contains_key(&self, key: &[u8]) -> StorageResult<bool> {
        self.tree
            .contains_key(key)
            .map_err(StorageDriverError::backend)
    }

    fn clear(&self) -> StorageResult<()> {
        self.tree.clear().map_err(StorageDriverError::backend)
    }

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.tree.is_empty())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.tree.len())
    }

    fn iter(&self) -> StorageResult<TreeIter<'_>> {
        let iter = self.tree.iter().map(|entry| {
            entry
                .map(|(k, v)| (k.to_vec(), v.to_vec()))
                .map_err(StorageDriverError::backend)
        });
        Ok(Box::new(iter))
    }

    fn apply_batch(&self, batch: &WriteBatch) -> StorageResult<()> {
        let mut sled_batch = sled::Batch::default();
        for op in batch.ops() {
            match op {
                BatchOp::Insert { key, value } => {
                    sled_batch.insert(key.as_slice(), value.as_slice())
                }
                BatchOp::Remove { key } => sled_batch.remove(key.as_slice()),
            }
        }
        self.tree
            .apply_batch(sled_batch)
            .map_err(StorageDriverError::backend)
    }

    fn flush(&self) -> StorageResult<()> {
        self.tree.flush().map_err(StorageDriverError::backend)?;
        Ok(())
    }
}

impl StorageDriver for SledDriver {
    type Tree = SledTree;

    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = sled::open(path.as_ref()).map_err(StorageDriverError::backend)?;
        Ok(SledDriver { db })
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let tree = self.db.open_tree(name).map_err(StorageDriverError::backend)?;
        Ok(SledTree { tree })
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .db
            .tree_names()
            .into_iter()
            .filter(|name| &name[..] != SLED_DEFAULT_TREE)
            .map(|name| String::from_utf8_lossy(&name).into_owned())
            .collect())
    }

    fn flush(&self) -> StorageResult<()> {
        self.db.flush().map_err(StorageDriverError::backend)?;
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Sled
    }
}
