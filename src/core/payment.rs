//! Payment record, its lifecycle status, and the caller-supplied input

use crate::core::error::{FieldValidationError, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Maximum number of fractional digits an amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Maximum number of significant digits an amount may carry (`NUMERIC(12,2)`).
pub const AMOUNT_PRECISION: u32 = 12;

/// Lifecycle state of a payment
///
/// Any status may follow any other: updates assign the requested value
/// unconditionally. Stored and serialized as its symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Received,
    Pending,
    Approved,
    Declined,
    NotSent,
}

impl PaymentStatus {
    /// Every status, in declaration order
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Received,
        PaymentStatus::Pending,
        PaymentStatus::Approved,
        PaymentStatus::Declined,
        PaymentStatus::NotSent,
    ];

    /// Symbolic name as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Received => "RECEIVED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::Declined => "DECLINED",
            PaymentStatus::NotSent => "NOT_SENT",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::FieldError {
                field: "status".to_string(),
                message: format!("unknown payment status '{}'", s),
            })
    }
}

/// A persisted payment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub inquiry_ref_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_ref_id: Option<Uuid>,
    pub status: PaymentStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new record with a fresh identifier and both timestamps set to now
    pub fn new(
        inquiry_ref_id: Uuid,
        amount: Decimal,
        currency: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            inquiry_ref_id,
            amount,
            currency: currency.into(),
            transaction_ref_id: None,
            status,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`, never moving it backwards
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// Caller-supplied body of `create` and full `update`
///
/// Every field is optional at the type level so that missing required
/// fields surface as a [`ValidationError`] instead of a decode failure.
/// Identifier and timestamps are not part of the input: they are always
/// assigned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[validate(required(message = "is required"))]
    pub inquiry_ref_id: Option<Uuid>,

    #[validate(required(message = "is required"))]
    pub amount: Option<Decimal>,

    #[validate(
        required(message = "is required"),
        length(equal = 3, message = "must be exactly 3 characters")
    )]
    pub currency: Option<String>,

    pub transaction_ref_id: Option<Uuid>,

    pub status: Option<PaymentStatus>,

    pub note: Option<String>,
}

impl PaymentInput {
    /// Check required fields and amount bounds
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut errors: Vec<FieldValidationError> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errs) => FieldValidationError::from_validator(&errs),
        };

        if let Some(amount) = self.amount {
            if let Some(message) = amount_violation(amount) {
                errors.push(FieldValidationError {
                    field: "amount".to_string(),
                    message,
                });
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ValidationError::FieldError {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ValidationError::FieldErrors(errors)),
        }
    }

    /// Build a record from a checked input
    ///
    /// Returns a validation error when a required field is missing.
    pub fn into_payment(self, id: Uuid) -> Result<Payment, ValidationError> {
        self.check()?;
        let (Some(inquiry_ref_id), Some(amount), Some(currency)) =
            (self.inquiry_ref_id, self.amount, self.currency)
        else {
            return Err(ValidationError::FieldError {
                field: "payment".to_string(),
                message: "required fields are missing".to_string(),
            });
        };

        let mut payment = Payment::new(
            inquiry_ref_id,
            amount,
            currency,
            self.status.unwrap_or_default(),
        );
        payment.id = id;
        payment.transaction_ref_id = self.transaction_ref_id;
        payment.note = self.note;
        Ok(payment)
    }
}

fn amount_violation(amount: Decimal) -> Option<String> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Some("must not be negative".to_string());
    }
    let normalized = amount.normalize();
    if normalized.scale() > AMOUNT_SCALE {
        return Some(format!(
            "must have at most {} fractional digits",
            AMOUNT_SCALE
        ));
    }
    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if integer_digits > AMOUNT_PRECISION - AMOUNT_SCALE {
        return Some(format!(
            "must have at most {} integer digits",
            AMOUNT_PRECISION - AMOUNT_SCALE
        ));
    }
    None
}
