//! Router construction for the payment REST API

use crate::server::handlers::{
    AppState, create_payment, delete_payment, get_payment, health_check, search_payments,
    update_payment, update_payment_note, update_payment_status,
};
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// - GET /health, /healthz - Health check
/// - POST /payments - Create a payment
/// - GET /payments/search - Filtered, paginated search
/// - GET /payments/{id} - Fetch one payment
/// - PUT /payments/{id} - Replace a payment
/// - DELETE /payments/{id} - Delete a payment
/// - PATCH /payments/{id}/status - Update status only
/// - PATCH /payments/{id}/note - Update note only
pub fn build_router(state: AppState) -> Router {
    health_routes()
        .merge(payment_routes(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

fn payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/search", get(search_payments))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route("/payments/{id}/status", patch(update_payment_status))
        .route("/payments/{id}/note", patch(update_payment_note))
        .with_state(state)
}
