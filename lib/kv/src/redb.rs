use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// RedbStore is a KVStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Each set/delete is its own committed
/// write transaction, so a stored document is never partially visible.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(|e| KVError::Storage(e.to_string()))?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db
            .begin_write()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| KVError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| KVError::Storage(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| KVError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(KVError::Storage(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| KVError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| KVError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| KVError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| KVError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| KVError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        let iter = table
            .range(prefix..)
            .map_err(|e| KVError::Storage(e.to_string()))?;

        for entry in iter {
            let entry = entry.map_err(|e| KVError::Storage(e.to_string()))?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            let value = entry.1.value().to_vec();
            results.push((key, value));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> RedbStore {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        RedbStore::open(tmp.path()).unwrap()
    }

    #[test]
    fn test_get_set_delete() {
        let store = test_store();

        assert!(store.get("user:1").unwrap().is_none());

        store.set("user:1", b"{\"name\":\"Asha\"}").unwrap();
        assert_eq!(store.get("user:1").unwrap().unwrap(), b"{\"name\":\"Asha\"}");

        store.delete("user:1").unwrap();
        assert!(store.get("user:1").unwrap().is_none());

        // Deleting a missing key is not an error.
        store.delete("user:1").unwrap();
    }

    #[test]
    fn test_scan_prefix() {
        let store = test_store();

        store.set("task:a", b"1").unwrap();
        store.set("task:b", b"2").unwrap();
        store.set("goal:a", b"3").unwrap();

        let tasks = store.scan("task:").unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].0, "task:a");
        assert_eq!(tasks[1].0, "task:b");

        let all = store.scan("").unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = test_store();

        store.set("user:1", b"a").unwrap();
        store.set("user:1", b"b").unwrap();

        assert_eq!(store.get("user:1").unwrap().unwrap(), b"b");
    }
}
