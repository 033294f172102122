//! # Payment Records
//!
//! A payment-record lifecycle service: create, fetch, search, replace,
//! patch and delete payments, backed by a pluggable record store.
//!
//! ## Features
//!
//! - **Dynamic search**: optional criteria compile to a store-neutral predicate
//! - **Pagination & sorting**: zero-indexed pages, stable order with `id` tie-break
//! - **Typed errors**: not-found, validation, storage and config categories
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//! - **REST adapter**: axum router with uniform JSON error bodies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payments::prelude::*;
//!
//! let service = PaymentService::from_store(InMemoryPaymentStore::new());
//!
//! let created = service
//!     .create(PaymentInput {
//!         inquiry_ref_id: Some(Uuid::new_v4()),
//!         amount: Some("100.00".parse()?),
//!         currency: Some("USD".to_string()),
//!         status: Some(PaymentStatus::Pending),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! service.update_status(created.id, PaymentStatus::Approved).await?;
//!
//! let filter = PaymentFilter::default().with_currency("USD");
//! let request = PageRequest::new(0, 25, "updatedAt", "desc")?;
//! let page = service.search(&filter, &request).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        dto::{NoteUpdateDto, PaymentDto, StatusUpdateDto},
        error::{
            ConfigError, ErrorResponse, NotFoundError, Operation, PaymentError, PaymentResult,
            StorageError, ValidationError,
        },
        filter::{Clause, PaymentFilter, Predicate},
        payment::{Payment, PaymentInput, PaymentStatus},
        query::{Page, PageRequest, PaginatedResponse, Sort, SortDirection, SortField},
        service::PaymentService,
        store::PaymentStore,
    };

    // === Configuration ===
    pub use crate::config::{SearchConfig, ServerConfig, ServiceConfig, StorageBackend, StorageConfig};

    // === Storage ===
    pub use crate::storage::InMemoryPaymentStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresPaymentStore;

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === External re-exports ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
