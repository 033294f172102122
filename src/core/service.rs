//! Payment lifecycle service
//!
//! All mutations pass through [`PaymentService`]. It checks existence before
//! every targeted operation and maps a missing record to a
//! [`NotFoundError`] naming the operation and identifier.
//!
//! Targeted mutations are check-then-act: `exists`/`get` and the following
//! `save`/`delete_by_id` are separate store calls with no transaction
//! around them. A concurrent delete landing in between can make an update
//! write the record back, or turn a delete into a no-op. Callers needing
//! strict consistency must serialize those requests themselves.

use crate::core::error::{NotFoundError, Operation, PaymentResult};
use crate::core::filter::{PaymentFilter, Predicate};
use crate::core::payment::{Payment, PaymentInput, PaymentStatus};
use crate::core::query::{Page, PageRequest};
use crate::core::store::PaymentStore;
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates store access for payment records
///
/// Holds no mutable state; cloning shares the underlying store.
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn PaymentStore>) -> Self {
        Self { store }
    }

    pub fn from_store<S: PaymentStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    pub fn store(&self) -> &Arc<dyn PaymentStore> {
        &self.store
    }

    /// Validate and persist a new payment under a fresh identifier
    #[tracing::instrument(skip_all, fields(backend = self.store.backend_name()))]
    pub async fn create(&self, input: PaymentInput) -> PaymentResult<Payment> {
        let payment = input.into_payment(Uuid::new_v4())?;
        let saved = self.store.save(payment).await?;
        tracing::info!(payment_id = %saved.id, status = %saved.status, "payment created");
        Ok(saved)
    }

    /// Fetch a payment by identifier
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> PaymentResult<Payment> {
        self.load(id, Operation::Get).await
    }

    /// Page through payments matching `filter`
    ///
    /// An empty result is a valid page with a zero total.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        filter: &PaymentFilter,
        request: &PageRequest,
    ) -> PaymentResult<Page<Payment>> {
        let predicate = Predicate::from_filter(filter);
        let (items, total) = self.store.find_all(&predicate, request).await?;
        tracing::debug!(
            clauses = predicate.clauses().len(),
            returned = items.len(),
            total,
            "search completed"
        );
        Ok(Page::new(items, total, request))
    }

    /// Replace every field of an existing payment
    ///
    /// Existence is checked first, so a missing identifier is reported as
    /// not found whatever the input holds.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: PaymentInput) -> PaymentResult<Payment> {
        self.ensure_exists(id, Operation::Update).await?;

        let payment = input.into_payment(id)?;
        let saved = self.store.save(payment).await?;
        tracing::info!(status = %saved.status, "payment replaced");
        Ok(saved)
    }

    /// Set the status of an existing payment, leaving every other field alone
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: PaymentStatus) -> PaymentResult<Payment> {
        let mut payment = self.load(id, Operation::UpdateStatus).await?;
        let previous = payment.status;
        payment.status = status;

        let saved = self.store.save(payment).await?;
        tracing::info!(from = %previous, to = %saved.status, "payment status updated");
        Ok(saved)
    }

    /// Set or clear the note of an existing payment, leaving every other field alone
    #[tracing::instrument(skip(self, note))]
    pub async fn update_note(&self, id: Uuid, note: Option<String>) -> PaymentResult<Payment> {
        let mut payment = self.load(id, Operation::UpdateNote).await?;
        payment.note = note;

        let saved = self.store.save(payment).await?;
        tracing::info!(has_note = saved.note.is_some(), "payment note updated");
        Ok(saved)
    }

    /// Permanently remove an existing payment
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> PaymentResult<()> {
        self.ensure_exists(id, Operation::Delete).await?;
        self.store.delete_by_id(&id).await?;
        tracing::info!("payment deleted");
        Ok(())
    }

    async fn load(&self, id: Uuid, operation: Operation) -> PaymentResult<Payment> {
        match self.store.get(&id).await? {
            Some(payment) => Ok(payment),
            None => Err(not_found(operation, id)),
        }
    }

    async fn ensure_exists(&self, id: Uuid, operation: Operation) -> PaymentResult<()> {
        if self.store.exists(&id).await? {
            Ok(())
        } else {
            Err(not_found(operation, id))
        }
    }
}

fn not_found(operation: Operation, id: Uuid) -> crate::core::error::PaymentError {
    tracing::warn!(%operation, payment_id = %id, "payment not found");
    NotFoundError::new(operation, id).into()
}
