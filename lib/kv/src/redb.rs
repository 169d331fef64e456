use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

fn store_err(e: impl Display) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Every trait call runs in its own
/// transaction, so an operation either fully commits or leaves no trace.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(store_err)?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db.begin_write().map_err(store_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(store_err)?;
        }
        write_txn.commit().map_err(store_err)?;

        debug!("opened redb store at {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }

    fn write<F>(&self, op: F) -> Result<(), KVError>
    where
        F: FnOnce(&mut redb::Table<'_, &str, &[u8]>) -> Result<(), KVError>,
    {
        let write_txn = self.db.begin_write().map_err(store_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(store_err)?;
            op(&mut table)?;
        }
        write_txn.commit().map_err(store_err)
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(store_err)?;
        let table = read_txn.open_table(TABLE).map_err(store_err)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(store_err(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write(|table| {
            table.insert(key, value).map_err(store_err)?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write(|table| {
            table.remove(key).map_err(store_err)?;
            Ok(())
        })
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(store_err)?;
        let table = read_txn.open_table(TABLE).map_err(store_err)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(store_err)?;

        for entry in iter {
            let entry = entry.map_err(store_err)?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, entry.1.value().to_vec()));
        }

        Ok(results)
    }
}
