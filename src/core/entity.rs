//! Base trait for persisted records

/// A unique key a record claims in its collection
///
/// Repositories reject a create or update when another record already
/// claims the same `(field, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    pub field: &'static str,
    pub value: String,
}

impl UniqueKey {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Record trait: anything a [`Repository`](crate::core::repository::Repository) can store
///
/// Ids are assigned by the repository on creation; a freshly built record
/// carries id `0` until then.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity kind used in logs and error messages (e.g., "review")
    const KIND: &'static str;

    /// Internal numeric id
    fn id(&self) -> i64;

    /// Set the id (called by the repository on creation)
    fn set_id(&mut self, id: i64);

    /// Unique keys claimed by this record
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }
}
