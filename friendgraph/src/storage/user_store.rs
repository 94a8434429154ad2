// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph store adapter
//!
//! [`UserStore`] maps user ids to encoded [`User`] records in one storage
//! tree. Each method runs exactly one storage transaction; nothing here
//! spans two calls. Protocols that touch several users build a
//! [`CommitSet`] and hand it to [`UserStore::commit`], which lands all of
//! it in a single atomic batch.

use log::{debug, error};

use super::codec::{decode_user, encode_user};
use super::id::next_user_id;
use super::persistent::{open_storage, StorageTree, StorageType, WriteBatch};
use super::types::User;
use crate::config::FriendGraphConfig;
use crate::error::{FriendGraphError, FriendGraphResult};

/// Full-record writes and removals applied together
#[derive(Debug, Default, Clone)]
pub struct CommitSet {
    puts: Vec<User>,
    deletes: Vec<String>,
}

impl CommitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full overwrite of `user`; the id must already be assigned
    pub fn put(&mut self, user: User) -> &mut Self {
        self.puts.push(user);
        self
    }

    pub fn delete(&mut self, id: impl Into<String>) -> &mut Self {
        self.deletes.push(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.puts.is_empty() && self.deletes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.puts.len() + self.deletes.len()
    }
}

/// Key-value table of users
pub struct UserStore {
    tree: Box<dyn StorageTree>,
    storage_type: StorageType,
}

impl UserStore {
    /// Open the store described by `config`
    pub fn open(config: &FriendGraphConfig) -> FriendGraphResult<Self> {
        let tree = open_storage(config.storage_type, &config.path, &config.tree_name)?;
        Ok(Self::from_tree(tree, config.storage_type))
    }

    /// Volatile store, used by tests and `--storage memory`
    pub fn in_memory() -> FriendGraphResult<Self> {
        Self::open(&FriendGraphConfig::in_memory())
    }

    pub fn from_tree(tree: Box<dyn StorageTree>, storage_type: StorageType) -> Self {
        Self { tree, storage_type }
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    /// Read and decode the user stored under `id`
    pub fn get(&self, id: &str) -> FriendGraphResult<Option<User>> {
        match self.tree.get(id.as_bytes())? {
            Some(bytes) => {
                let user = decode_user(&bytes).map_err(|e| {
                    error!("Failed to decode user '{}': {}", id, e);
                    e
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Overwrite the record for `user`, minting an id first when it is empty
    pub fn put(&self, user: &mut User) -> FriendGraphResult<String> {
        if user.id.is_empty() {
            user.id = next_user_id();
        }

        let bytes = encode_user(user)?;
        self.tree
            .insert(user.id.as_bytes(), &bytes)
            .map_err(|e| {
                error!("Failed to save user '{}': {}", user.id, e);
                FriendGraphError::from(e)
            })?;

        debug!("Stored user '{}'", user.id);
        Ok(user.id.clone())
    }

    /// Remove the record under `id`; absent ids are a no-op
    pub fn delete(&self, id: &str) -> FriendGraphResult<()> {
        self.tree.remove(id.as_bytes()).map_err(|e| {
            error!("Failed to delete user '{}': {}", id, e);
            FriendGraphError::from(e)
        })?;
        debug!("Deleted user '{}'", id);
        Ok(())
    }

    /// Apply every write of `set` in one atomic batch
    pub fn commit(&self, set: CommitSet) -> FriendGraphResult<()> {
        if set.is_empty() {
            return Ok(());
        }

        let mut batch = WriteBatch::new();
        for user in &set.puts {
            if user.id.is_empty() {
                return Err(FriendGraphError::validation(
                    "cannot commit a user without an id",
                ));
            }
            batch.insert(user.id.as_bytes(), encode_user(user)?);
        }
        for id in &set.deletes {
            batch.remove(id.as_bytes());
        }

        self.tree.apply_batch(&batch).map_err(|e| {
            error!("Failed to commit {} user writes: {}", batch.len(), e);
            FriendGraphError::from(e)
        })?;

        debug!(
            "Committed {} puts and {} deletes",
            set.puts.len(),
            set.deletes.len()
        );
        Ok(())
    }

    pub fn contains(&self, id: &str) -> FriendGraphResult<bool> {
        Ok(self.tree.contains_key(id.as_bytes())?)
    }

    /// Every stored user in key order
    pub fn all_users(&self) -> FriendGraphResult<Vec<User>> {
        self.tree
            .iter()?
            .map(|entry| {
                let (_, bytes) = entry?;
                decode_user(&bytes)
            })
            .collect()
    }

    pub fn len(&self) -> FriendGraphResult<usize> {
        Ok(self.tree.len()?)
    }

    pub fn is_empty(&self) -> FriendGraphResult<bool> {
        Ok(self.tree.is_empty()?)
    }

    /// Drop every record in the table
    pub fn clear(&self) -> FriendGraphResult<()> {
        self.tree.clear()?;
        debug!("Cleared user table");
        Ok(())
    }

    pub fn flush(&self) -> FriendGraphResult<()> {
        Ok(self.tree.flush()?)
    }

    /// Write raw bytes under `id`, bypassing the codec
    #[cfg(test)]
    pub(crate) fn put_raw(&self, id: &str, bytes: &[u8]) -> FriendGraphResult<()> {
        Ok(self.tree.insert(id.as_bytes(), bytes)?)
    }
}
