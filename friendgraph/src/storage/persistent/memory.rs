// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory storage driver
//!
//! Trees are `BTreeMap`s behind a `parking_lot::RwLock`. Nothing is written
//! to disk; `open` ignores its path.

use super::traits::{StorageDriver, StorageTree, TreeIter};
use super::types::{BatchOp, StorageResult, StorageType, WriteBatch};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

type Table = Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>;

#[derive(Default)]
pub struct MemoryDriver {
    trees: RwLock<HashMap<String, Table>>,
}

pub struct MemoryTree {
    table: Table,
}

impl StorageTree for MemoryTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.table.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.table.read().get(key).cloned())
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.table.write().remove(key);
        Ok(())
    }

    fn contains_key(&self, key: &[u8]) -> StorageResult<bool> {
        Ok(self.table.read().contains_key(key))
    }

    fn clear(&self) -> StorageResult<()> {
        self.table.write().clear();
        Ok(())
    }

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.table.read().is_empty())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.table.read().len())
    }

    fn iter(&self) -> StorageResult<TreeIter<'_>> {
        let snapshot: Vec<_> = self
            .table
            .read()
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.clone())))
            .collect();
        Ok(Box::new(snapshot.into_iter()))
    }

    fn apply_batch(&self, batch: &WriteBatch) -> StorageResult<()> {
        let mut table = self.table.write();
        for op in batch.ops() {
            match op {
                BatchOp::Insert { key, value } => {
                    table.insert(key.clone(), value.clone());
                }
                BatchOp::Remove { key } => {
                    table.remove(key);
                }
            }
        }
        Ok(())
    }

    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }
}

impl StorageDriver for MemoryDriver {
    type Tree = MemoryTree;

    fn open<P: AsRef<Path>>(_path: P) -> StorageResult<Self> {
        Ok(MemoryDriver::default())
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let table = self
            .trees
            .write()
            .entry(name.to_string())
            .or_default()
            .clone();
        Ok(MemoryTree { table })
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self.trees.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Memory
    }
}
