//! Record store trait

use crate::core::error::StorageError;
use crate::core::filter::Predicate;
use crate::core::payment::Payment;
use crate::core::query::PageRequest;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed durable storage for payments
///
/// Implementations report infrastructure failures as [`StorageError`] and
/// never decide user-facing semantics: a missing record is `None`/`false`,
/// and deleting a missing record is a no-op.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Point lookup by identifier
    async fn get(&self, id: &Uuid) -> Result<Option<Payment>, StorageError>;

    /// Whether a record with this identifier exists
    async fn exists(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Page through records matching `predicate`
    ///
    /// Records are ordered by the request's sort, ties broken by `id`
    /// ascending. Returns the page items and the size of the full matching
    /// set.
    async fn find_all(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<(Vec<Payment>, u64), StorageError>;

    /// Insert or replace by identifier
    ///
    /// A new record is stored with its timestamps as given (`updated_at`
    /// raised to `created_at` if earlier). Replacing an existing record keeps
    /// its `created_at` and refreshes `updated_at` to now, never moving it
    /// backwards.
    async fn save(&self, payment: Payment) -> Result<Payment, StorageError>;

    /// Remove a record
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StorageError>;

    /// Backend name used in logs and errors
    fn backend_name(&self) -> &'static str;
}
