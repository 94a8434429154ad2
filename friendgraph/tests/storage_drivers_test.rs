// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! Contract tests shared by every storage driver

use friendgraph::storage::persistent::{
    open_storage, MemoryDriver, StorageDriver, StorageTree, StorageType, WriteBatch,
};
use tempfile::TempDir;

fn check_basic_operations(tree: &dyn StorageTree) {
    tree.insert(b"key1", b"value1").unwrap();
    assert_eq!(tree.get(b"key1").unwrap(), Some(b"value1".to_vec()));

    assert!(tree.contains_key(b"key1").unwrap());
    assert!(!tree.contains_key(b"key2").unwrap());

    // overwrite replaces the whole value
    tree.insert(b"key1", b"v").unwrap();
    assert_eq!(tree.get(b"key1").unwrap(), Some(b"v".to_vec()));

    tree.remove(b"key1").unwrap();
    assert!(!tree.contains_key(b"key1").unwrap());
    assert_eq!(tree.get(b"key1").unwrap(), None);

    // removing an absent key is fine
    tree.remove(b"key1").unwrap();
}

fn check_batch_is_applied_in_order(tree: &dyn StorageTree) {
    tree.insert(b"stale", b"x").unwrap();

    let mut batch = WriteBatch::new();
    batch.insert(b"key1".to_vec(), b"value1".to_vec());
    batch.insert(b"key2".to_vec(), b"value2".to_vec());
    batch.remove(b"stale".to_vec());
    batch.insert(b"key2".to_vec(), b"value2b".to_vec());
    assert_eq!(batch.len(), 4);

    tree.apply_batch(&batch).unwrap();

    assert_eq!(tree.get(b"key1").unwrap(), Some(b"value1".to_vec()));
    assert_eq!(tree.get(b"key2").unwrap(), Some(b"value2b".to_vec()));
    assert!(!tree.contains_key(b"stale").unwrap());
    assert_eq!(tree.len().unwrap(), 2);
}

fn check_iteration_and_clear(tree: &dyn StorageTree) {
    tree.insert(b"b", b"2").unwrap();
    tree.insert(b"a", b"1").unwrap();
    tree.insert(b"c", b"3").unwrap();

    let items: Vec<_> = tree.iter().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
    let keys: Vec<_> = items.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    assert!(!tree.is_empty().unwrap());

    tree.clear().unwrap();
    assert!(tree.is_empty().unwrap());
    assert_eq!(tree.len().unwrap(), 0);
}

fn check_all(storage_type: StorageType) {
    let temp_dir = TempDir::new().unwrap();
    for (idx, check) in [
        check_basic_operations as fn(&dyn StorageTree),
        check_batch_is_applied_in_order,
        check_iteration_and_clear,
    ]
    .into_iter()
    .enumerate()
    {
        let path = temp_dir.path().join(format!("db{}", idx));
        std::fs::create_dir_all(&path).unwrap();
        let tree = open_storage(storage_type, &path, "users").unwrap();
        check(tree.as_ref());
    }
}

#[test]
fn test_memory_contract() {
    check_all(StorageType::Memory);
}

#[test]
fn test_sled_contract() {
    check_all(StorageType::Sled);
}

#[test]
fn test_redb_contract() {
    check_all(StorageType::Redb);
}

#[test]
fn test_memory_trees_are_isolated() {
    let driver = MemoryDriver::open("unused").unwrap();
    let tree1 = driver.open_tree("tree1").unwrap();
    let tree2 = driver.open_tree("tree2").unwrap();

    tree1.insert(b"key", b"value1").unwrap();
    tree2.insert(b"key", b"value2").unwrap();

    assert_eq!(tree1.get(b"key").unwrap(), Some(b"value1".to_vec()));
    assert_eq!(tree2.get(b"key").unwrap(), Some(b"value2".to_vec()));

    // reopening a tree sees the same data
    let again = driver.open_tree("tree1").unwrap();
    assert_eq!(again.get(b"key").unwrap(), Some(b"value1".to_vec()));

    assert_eq!(
        driver.list_trees().unwrap(),
        vec!["tree1".to_string(), "tree2".to_string()]
    );
}

mod sled_tests {
    use friendgraph::storage::persistent::{SledDriver, StorageDriver, StorageTree};
    use tempfile::TempDir;

    #[test]
    fn test_sled_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("users.db");

        {
            let driver = SledDriver::open(&db_path).unwrap();
            let tree = driver.open_tree("persist_test").unwrap();
            tree.insert(b"persistent_key", b"persistent_value").unwrap();
            tree.flush().unwrap();
            assert!(driver
                .list_trees()
                .unwrap()
                .contains(&"persist_test".to_string()));
        }

        // Give sled's background flusher time to release the file lock
        std::thread::sleep(std::time::Duration::from_millis(100));

        {
            let driver = SledDriver::open(&db_path).unwrap();
            let tree = driver.open_tree("persist_test").unwrap();
            assert_eq!(
                tree.get(b"persistent_key").unwrap(),
                Some(b"persistent_value".to_vec())
            );
        }
    }
}

mod redb_tests {
    use friendgraph::storage::persistent::redb::REDB_FILE_NAME;
    use friendgraph::storage::persistent::{RedbDriver, StorageDriver, StorageTree};
    use tempfile::TempDir;

    #[test]
    fn test_redb_directory_gets_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let driver = RedbDriver::open(temp_dir.path()).unwrap();
        driver.open_tree("users").unwrap();
        assert!(temp_dir.path().join(REDB_FILE_NAME).exists());
    }

    #[test]
    fn test_redb_multiple_trees() {
        let temp_dir = TempDir::new().unwrap();
        let driver = RedbDriver::open(temp_dir.path()).unwrap();

        let tree1 = driver.open_tree("tree1").unwrap();
        let tree2 = driver.open_tree("tree2").unwrap();

        tree1.insert(b"key", b"value1").unwrap();
        tree2.insert(b"key", b"value2").unwrap();

        assert_eq!(tree1.get(b"key").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(tree2.get(b"key").unwrap(), Some(b"value2".to_vec()));

        let trees = driver.list_trees().unwrap();
        assert!(trees.contains(&"tree1".to_string()));
        assert!(trees.contains(&"tree2".to_string()));
    }

    #[test]
    fn test_redb_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("users.redb");

        {
            let driver = RedbDriver::open(&db_path).unwrap();
            let tree = driver.open_tree("persist_test").unwrap();
            tree.insert(b"persistent_key", b"persistent_value").unwrap();
        }

        {
            let driver = RedbDriver::open(&db_path).unwrap();
            let tree = driver.open_tree("persist_test").unwrap();
            assert_eq!(
                tree.get(b"persistent_key").unwrap(),
                Some(b"persistent_value".to_vec())
            );
        }
    }
}
