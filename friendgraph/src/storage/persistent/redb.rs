// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! REDB storage driver implementation

use super::traits::{StorageDriver, StorageTree, TreeIter};
use super::types::{BatchOp, StorageDriverError, StorageResult, StorageType, WriteBatch};
use redb::{
    Database, ReadOnlyTable, ReadableTable, ReadableTableMetadata, Table, TableDefinition,
    TableHandle,
};
use std::path::Path;
use std::sync::Arc;

/// File name used when the configured path is a directory
pub const REDB_FILE_NAME: &str = "friendgraph.redb";

type RawTable<'txn> = Table<'txn, &'static [u8], &'static [u8]>;
type RawReadTable = ReadOnlyTable<&'static [u8], &'static [u8]>;

/// REDB driver implementation
pub struct RedbDriver {
    db: Arc<Database>,
}

/// REDB tree wrapper that implements StorageTree trait
/// In REDB, each "tree" is actually a separate table in the database
pub struct RedbTree {
    db: Arc<Database>,
    table_name: String,
}

impl RedbTree {
    fn definition(&self) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
        TableDefinition::new(&self.table_name)
    }

    /// Run `f` against the table inside one write transaction and commit
    fn write<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut RawTable<'_>) -> StorageResult<T>,
    {
        let write_txn = self.db.begin_write().map_err(StorageDriverError::backend)?;

        let result = {
            let mut table = write_txn
                .open_table(self.definition())
                .map_err(StorageDriverError::backend)?;
            f(&mut table)?
        };

        write_txn.commit().map_err(StorageDriverError::backend)?;
        Ok(result)
    }

    /// Run `f` against the table inside one read transaction
    fn read<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&RawReadTable) -> StorageResult<T>,
    {
        let read_txn = self.db.begin_read().map_err(StorageDriverError::backend)?;
        let table = read_txn
            .open_table(self.definition())
            .map_err(StorageDriverError::backend)?;
        f(&table)
    }
}

impl StorageTree for RedbTree {
    fn insert(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.write(|table| {
            table.insert(key, value).map_err(StorageDriverError::backend)?;
            Ok(())
        })
    }

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.read(|table| {
            let guard = table.get(key).map_err(StorageDriverError::backend)?;
            Ok(guard.map(|value| value.value().to_vec()))
        })
    }

    fn remove(&self, key: &[u8]) -> StorageResult<()> {
        self.write(|table| {
            table.remove(key).map_err(StorageDriverError::backend)?;
            Ok(())
        })
    }

    fn contains_key(&self, key: &[u8]) -> StorageResult<bool> {
        self.read(|table| {
            let guard = table.get(key).map_err(StorageDriverError::backend)?;
            Ok(guard.is_some())
        })
    }

    fn clear(&self) -> StorageResult<()> {
        self.write(|table| {
            // Collect keys first, the iterator borrows the table
            let keys: Vec<Vec<u8>> = table
                .iter()
                .map_err(StorageDriverError::backend)?
                .map(|entry| {
                    entry
                        .map(|(k, _)| k.value().to_vec())
                        .map_err(StorageDriverError::backend)
                })
                .collect::<StorageResult<_>>()?;

            for key in keys {
                table
                    .remove(key.as_slice())
                    .map_err(StorageDriverError::backend)?;
            }
            Ok(())
        })
    }

    fn is_empty(&self) -> StorageResult<bool> {
        self.read(|table| table.is_empty().map_err(StorageDriverError::backend))
    }

    fn len(&self) -> StorageResult<usize> {
        self.read(|table| {
            let len = table.len().map_err(StorageDriverError::backend)?;
            Ok(len as usize)
        })
    }

    fn iter(&self) -> StorageResult<TreeIter<'_>> {
        // REDB iterators are tied to the read transaction, so the snapshot
        // is materialized before the transaction ends
        let items: Vec<StorageResult<(Vec<u8>, Vec<u8>)>> = self.read(|table| {
            Ok(table
                .iter()
                .map_err(StorageDriverError::backend)?
                .map(|entry| {
                    entry
                        .map(|(k, v)| (k.value().to_vec(), v.value().to_vec()))
                        .map_err(StorageDriverError::backend)
                })
                .collect())
        })?;

        Ok(Box::new(items.into_iter()))
    }

    fn apply_batch(&self, batch: &WriteBatch) -> StorageResult<()> {
        // A write transaction that is dropped without commit is aborted,
        // so an error half way leaves the table untouched
        self.write(|table| {
            for op in batch.ops() {
                match op {
                    BatchOp::Insert { key, value } => {
                        table
                            .insert(key.as_slice(), value.as_slice())
                            .map_err(StorageDriverError::backend)?;
                    }
                    BatchOp::Remove { key } => {
                        table
                            .remove(key.as_slice())
                            .map_err(StorageDriverError::backend)?;
                    }
                }
            }
            Ok(())
        })
    }

    fn flush(&self) -> StorageResult<()> {
        // Every committed REDB write transaction is already durable
        Ok(())
    }
}

impl StorageDriver for RedbDriver {
    type Tree = RedbTree;

    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        // REDB requires a file path, not a directory
        let path = path.as_ref();
        let db_path = if path.is_dir() {
            path.join(REDB_FILE_NAME)
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            path.to_path_buf()
        };

        let db = Database::create(&db_path).map_err(StorageDriverError::backend)?;

        Ok(RedbDriver { db: Arc::new(db) })
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        // Tables only exist once opened in a write transaction
        let write_txn = self.db.begin_write().map_err(StorageDriverError::backend)?;
        {
            let table_def: TableDefinition<&[u8], &[u8]> = TableDefinition::new(name);
            write_txn
                .open_table(table_def)
                .map_err(StorageDriverError::backend)?;
        }
        write_txn.commit().map_err(StorageDriverError::backend)?;

        Ok(RedbTree {
            db: self.db.clone(),
            table_name: name.to_string(),
        })
    }

    fn list_trees(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read().map_err(StorageDriverError::backend)?;

        let table_names = read_txn
            .list_tables()
            .map_err(StorageDriverError::backend)?
            .map(|handle| handle.name().to_string())
            .collect();

        Ok(table_names)
    }

    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Redb
    }
}
