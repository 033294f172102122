//! External representation of a payment
//!
//! `PaymentDto` mirrors [`Payment`] field for field, so the conversion is a
//! total bijection expressed as a pair of `From` impls.

use crate::core::payment::{Payment, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment as exposed to clients (camelCase, identifier named `guid`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub guid: Uuid,
    pub inquiry_ref_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_ref_id: Option<Uuid>,
    pub status: PaymentStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            guid: payment.id,
            inquiry_ref_id: payment.inquiry_ref_id,
            amount: payment.amount,
            currency: payment.currency,
            transaction_ref_id: payment.transaction_ref_id,
            status: payment.status,
            note: payment.note,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Self {
            id: dto.guid,
            inquiry_ref_id: dto.inquiry_ref_id,
            amount: dto.amount,
            currency: dto.currency,
            transaction_ref_id: dto.transaction_ref_id,
            status: dto.status,
            note: dto.note,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Body of `PATCH /payments/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateDto {
    pub status: PaymentStatus,
}

/// Body of `PATCH /payments/{id}/note`
///
/// A missing or `null` note clears the annotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteUpdateDto {
    #[serde(default)]
    pub note: Option<String>,
}
