//! In-memory implementation of PaymentStore for testing and development

use crate::core::error::StorageError;
use crate::core::filter::Predicate;
use crate::core::payment::Payment;
use crate::core::query::PageRequest;
use crate::core::store::PaymentStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in_memory";

/// In-memory payment store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Searches scan every record, evaluate the predicate, then sort and slice.
#[derive(Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, StorageError> {
        let payments = self.payments.read().map_err(lock_error)?;
        Ok(payments.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::ConnectionError {
        backend: BACKEND.to_string(),
        message: format!("Failed to acquire lock: {}", e),
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn get(&self, id: &Uuid) -> Result<Option<Payment>, StorageError> {
        let payments = self.payments.read().map_err(lock_error)?;

        Ok(payments.get(id).cloned())
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, StorageError> {
        let payments = self.payments.read().map_err(lock_error)?;

        Ok(payments.contains_key(id))
    }

    async fn find_all(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<(Vec<Payment>, u64), StorageError> {
        let payments = self.payments.read().map_err(lock_error)?;

        let mut matching: Vec<&Payment> = payments
            .values()
            .filter(|payment| predicate.matches(payment))
            .collect();
        let total = matching.len() as u64;

        let sort = request.sort();
        matching.sort_by(|a, b| sort.compare(a, b));

        let items = matching
            .into_iter()
            .skip(request.offset())
            .take(request.page_size())
            .cloned()
            .collect::<Vec<_>>();

        tracing::debug!(
            backend = BACKEND,
            total,
            returned = items.len(),
            "in-memory search"
        );

        Ok((items, total))
    }

    async fn save(&self, mut payment: Payment) -> Result<Payment, StorageError> {
        let mut payments = self.payments.write().map_err(lock_error)?;

        match payments.get(&payment.id) {
            Some(existing) => {
                payment.created_at = existing.created_at;
                payment.updated_at = Utc::now().max(existing.updated_at);
            }
            None => {
                payment.updated_at = payment.updated_at.max(payment.created_at);
            }
        }

        payments.insert(payment.id, payment.clone());

        Ok(payment)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StorageError> {
        let mut payments = self.payments.write().map_err(lock_error)?;

        payments.remove(id);

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
