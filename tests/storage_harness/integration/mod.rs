//! Integration test infrastructure for storage backends.
//!
//! Builds the production router over any `PaymentStore` and wraps it in an
//! `axum_test::TestServer`, so the REST suite exercises the full path
//! (HTTP → handler → PaymentService → PaymentStore → response).
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (payments::server::build_router)
//!         ├─ POST   /payments
//!         ├─ GET    /payments/search
//!         ├─ GET    /payments/{id}
//!         ├─ PUT    /payments/{id}
//!         ├─ DELETE /payments/{id}
//!         ├─ PATCH  /payments/{id}/status
//!         └─ PATCH  /payments/{id}/note
//! ```


use axum_test::TestServer;
use payments::config::SearchConfig;
use payments::core::{PaymentService, PaymentStore};
use payments::server::{AppState, build_router};

/// Wrap `store` in the full REST stack with default search settings.
pub fn build_test_server<S: PaymentStore + 'static>(store: S) -> TestServer {
    build_test_server_with(store, SearchConfig::default())
}

/// Wrap `store` in the full REST stack with custom search settings.
pub fn build_test_server_with<S: PaymentStore + 'static>(
    store: S,
    search: SearchConfig,
) -> TestServer {
    let state = AppState::new(PaymentService::from_store(store), search).unwrap();
    TestServer::new(build_router(state))
}
