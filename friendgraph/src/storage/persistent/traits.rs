// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver traits
//!
//! A driver owns the underlying database; a tree is one named key-value
//! table inside it. Every tree method runs in its own short-lived
//! transaction. No transaction spans two calls, so callers that need
//! several keys to change together must go through [`StorageTree::apply_batch`].

use super::types::{StorageResult, StorageType, WriteBatch};
use std::path::Path;

/// Iterator over the `(key, value)` pairs of a tree
pub type TreeIter<'a> = Box<dyn Iterator<Item = StorageResult<(Vec<u8>, Vec<u8>)>> + 'a>;

/// A named key-value table
pub trait StorageTree: Send + Sync {
    /// Insert or overwrite a key
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Read a key, `None` if absent
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Remove a key; removing an absent key succeeds
    fn remove(&self, key: &[u8]) -> StorageResult<()>;

    fn contains_key(&self, key: &[u8]) -> StorageResult<bool>;

    /// Remove every key in the tree
    fn clear(&self) -> StorageResult<()>;

    fn is_empty(&self) -> StorageResult<bool>;

    fn len(&self) -> StorageResult<usize>;

    /// Snapshot of all entries in key order
    fn iter(&self) -> StorageResult<TreeIter<'_>>;

    /// Apply every operation of the batch atomically, in order
    fn apply_batch(&self, batch: &WriteBatch) -> StorageResult<()>;

    /// Force pending writes to durable storage
    fn flush(&self) -> StorageResult<()>;
}

/// An embedded database engine
pub trait StorageDriver: Sized {
    type Tree: StorageTree + 'static;

    /// Open (creating if needed) the database at `path`
    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self>;

    /// Open (creating if needed) a named tree
    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree>;

    fn list_trees(&self) -> StorageResult<Vec<String>>;

    fn flush(&self) -> StorageResult<()>;

    fn storage_type(&self) -> StorageType;
}
