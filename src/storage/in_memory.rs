//! In-memory implementation of Repository for testing and development

use crate::core::entity::Record;
use crate::core::error::StorageError;
use crate::core::repository::{Predicate, Repository, StorageResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// In-memory repository implementation
///
/// Uses a single RwLock per table, so unique-key checks and inserts happen
/// under the same write guard.
#[derive(Clone)]
pub struct InMemoryRepository<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T: Record> InMemoryRepository<T> {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Table<T>>> {
        self.table
            .read()
            .map_err(|e| StorageError::Unavailable(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Table<T>>> {
        self.table
            .write()
            .map_err(|e| StorageError::Unavailable(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject `record` if another row (other than `record` itself) claims one of its keys
fn check_unique<T: Record>(table: &Table<T>, record: &T) -> StorageResult<()> {
    let keys = record.unique_keys();
    if keys.is_empty() {
        return Ok(());
    }

    for row in table.rows.values().filter(|row| row.id() != record.id()) {
        let taken = row.unique_keys();
        if let Some(key) = keys.iter().find(|k| taken.contains(k)) {
            return Err(StorageError::UniqueViolation {
                entity: T::KIND,
                field: key.field,
                value: key.value.clone(),
            });
        }
    }
    Ok(())
}

fn insert<T: Record>(table: &mut Table<T>, mut record: T) -> StorageResult<T> {
    record.set_id(0);
    check_unique(table, &record)?;

    record.set_id(table.next_id);
    table.next_id += 1;
    table.rows.insert(record.id(), record.clone());
    Ok(record)
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: i64) -> StorageResult<Option<T>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<T>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn find(&self, predicate: &Predicate<'_, T>) -> StorageResult<Vec<T>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect())
    }

    async fn find_one(&self, predicate: &Predicate<'_, T>) -> StorageResult<Option<T>> {
        Ok(self.read()?.rows.values().find(|row| predicate(*row)).cloned())
    }

    async fn exists(&self, predicate: &Predicate<'_, T>) -> StorageResult<bool> {
        Ok(self.read()?.rows.values().any(|row| predicate(row)))
    }

    async fn create(&self, record: T) -> StorageResult<T> {
        let mut table = self.write()?;
        insert(&mut table, record)
    }

    async fn get_or_create(
        &self,
        predicate: &Predicate<'_, T>,
        record: T,
    ) -> StorageResult<(T, bool)> {
        let mut table = self.write()?;

        if let Some(existing) = table.rows.values().find(|row| predicate(*row)) {
            return Ok((existing.clone(), false));
        }

        insert(&mut table, record).map(|created| (created, true))
    }

    async fn update(&self, record: T) -> StorageResult<T> {
        let mut table = self.write()?;

        if !table.rows.contains_key(&record.id()) {
            return Err(StorageError::NotFound {
                entity: T::KIND,
                id: record.id(),
            });
        }
        check_unique(&table, &record)?;

        table.rows.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    async fn delete_where(&self, predicate: &Predicate<'_, T>) -> StorageResult<usize> {
        let mut table = self.write()?;
        let before = table.rows.len();
        table.rows.retain(|_, row| !predicate(&*row));
        Ok(before - table.rows.len())
    }
}
