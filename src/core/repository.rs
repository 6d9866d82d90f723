//! Repository trait for record persistence
//!
//! Handlers and validators never touch storage directly: they receive a
//! `Repository<T>` per entity type and query it with predicates.

use crate::core::entity::Record;
use crate::core::error::StorageError;
use async_trait::async_trait;

/// Predicate over a record, used by the query operations
pub type Predicate<'a, T> = dyn Fn(&T) -> bool + Send + Sync + 'a;

/// Result alias for repository operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Data-access trait parameterized by entity type
///
/// Implementations must apply `create`, `update` and `get_or_create`
/// atomically with respect to the record's unique keys.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Get a record by id
    async fn get(&self, id: i64) -> StorageResult<Option<T>>;

    /// List all records in id order
    async fn list(&self) -> StorageResult<Vec<T>>;

    /// Find all records matching the predicate, in id order
    async fn find(&self, predicate: &Predicate<'_, T>) -> StorageResult<Vec<T>>;

    /// Find the first record matching the predicate
    async fn find_one(&self, predicate: &Predicate<'_, T>) -> StorageResult<Option<T>>;

    /// Check whether any record matches the predicate
    async fn exists(&self, predicate: &Predicate<'_, T>) -> StorageResult<bool>;

    /// Insert a new record, assigning its id
    async fn create(&self, record: T) -> StorageResult<T>;

    /// Return the first record matching the predicate, or insert `record`
    ///
    /// The boolean is `true` when a new record was created.
    async fn get_or_create(
        &self,
        predicate: &Predicate<'_, T>,
        record: T,
    ) -> StorageResult<(T, bool)>;

    /// Replace an existing record (matched by id)
    async fn update(&self, record: T) -> StorageResult<T>;

    /// Delete a record by id, returning whether it existed
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Delete every record matching the predicate, returning how many went
    async fn delete_where(&self, predicate: &Predicate<'_, T>) -> StorageResult<usize>;
}
