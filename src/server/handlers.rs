//! HTTP handlers for payment operations
//!
//! Handlers only translate between HTTP and [`PaymentService`]: every
//! failure, including malformed paths, queries and bodies, is rendered as a
//! [`PaymentError`] so clients always receive the same error body.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::SearchConfig;
use crate::core::error::{ConfigError, PaymentError, ValidationError};
use crate::core::query::{PageRequest, PaginatedResponse, Sort, SortDirection, SortField};
use crate::core::{
    NoteUpdateDto, PaymentDto, PaymentFilter, PaymentInput, PaymentService, PaymentStatus,
    StatusUpdateDto,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PaymentService,
    pub search: Arc<SearchConfig>,
    default_sort: Sort,
}

impl AppState {
    /// Build handler state, resolving the configured default sort once
    pub fn new(service: PaymentService, search: SearchConfig) -> Result<Self, ConfigError> {
        let default_sort = search.default_sort()?;
        Ok(Self {
            service,
            search: Arc::new(search),
            default_sort,
        })
    }

    fn page_request(&self, params: &SearchParams) -> Result<PageRequest, ValidationError> {
        let field = match params.sort_by.as_deref() {
            Some(name) => SortField::from_str(name)?,
            None => self.default_sort.field,
        };
        let direction = params
            .direction
            .as_deref()
            .map(SortDirection::parse_lenient)
            .unwrap_or(self.default_sort.direction);

        PageRequest::with_sort(
            params.page.unwrap_or(0),
            self.search.clamp_page_size(params.size),
            Sort::new(field, direction),
        )
    }
}

/// Query string of `GET /payments/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub currency: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl SearchParams {
    fn filter(&self) -> PaymentFilter {
        PaymentFilter {
            currency: self.currency.clone(),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            created_after: self.created_after,
            created_before: self.created_before,
            status: self.status,
        }
    }
}

fn bad_request(field: &str, message: impl ToString) -> PaymentError {
    ValidationError::FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

fn path_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, PaymentError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| bad_request("id", rejection.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, PaymentError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| bad_request("body", rejection.body_text()))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "payment-records"
    }))
}

/// GET /payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PaymentDto>, PaymentError> {
    let payment = state.service.get(path_id(id)?).await?;
    Ok(Json(payment.into()))
}

/// GET /payments/search
pub async fn search_payments(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<PaymentDto>>, PaymentError> {
    let Query(params) = params.map_err(|rejection| bad_request("query", rejection.body_text()))?;
    let request = state.page_request(&params)?;

    let page = state.service.search(&params.filter(), &request).await?;
    Ok(Json(page.map(PaymentDto::from).into()))
}

/// POST /payments
pub async fn create_payment(
    State(state): State<AppState>,
    body: Result<Json<PaymentInput>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentError> {
    let payment = state.service.create(json_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(PaymentDto::from(payment))))
}

/// PUT /payments/{id}
pub async fn update_payment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PaymentInput>, JsonRejection>,
) -> Result<Json<PaymentDto>, PaymentError> {
    let id = path_id(id)?;
    let payment = state.service.update(id, json_body(body)?).await?;
    Ok(Json(payment.into()))
}

/// PATCH /payments/{id}/status
pub async fn update_payment_status(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<StatusUpdateDto>, JsonRejection>,
) -> Result<Json<PaymentDto>, PaymentError> {
    let id = path_id(id)?;
    let StatusUpdateDto { status } = json_body(body)?;
    let payment = state.service.update_status(id, status).await?;
    Ok(Json(payment.into()))
}

/// PATCH /payments/{id}/note
pub async fn update_payment_note(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<NoteUpdateDto>, JsonRejection>,
) -> Result<Json<PaymentDto>, PaymentError> {
    let id = path_id(id)?;
    let NoteUpdateDto { note } = json_body(body)?;
    let payment = state.service.update_note(id, note).await?;
    Ok(Json(payment.into()))
}

/// DELETE /payments/{id}
pub async fn delete_payment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, PaymentError> {
    state.service.delete(path_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
