//! Search criteria and the predicate they compile to
//!
//! A [`PaymentFilter`] is a fully optional criteria object. [`Predicate::from_filter`]
//! turns it into a conjunction of [`Clause`]s, one per present field, starting
//! from the unrestricted predicate. Absent fields add nothing.
//!
//! # Range bounds
//!
//! `min_amount`/`max_amount` and `created_after`/`created_before` are
//! independent, inclusive bounds: each one present is applied on its own, and a
//! range is simply both bounds present. Both pairs follow the same rule.
//!
//! The predicate is store-neutral. The in-memory store evaluates it with
//! [`Predicate::matches`]; SQL stores translate each clause into a bound
//! condition.

use crate::core::payment::{Payment, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Search criteria; every `None` field means "no constraint on this dimension"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    pub currency: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
}

impl PaymentFilter {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_min_amount(mut self, min: Decimal) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn with_max_amount(mut self, max: Decimal) -> Self {
        self.max_amount = Some(max);
        self
    }

    pub fn with_created_after(mut self, after: DateTime<Utc>) -> Self {
        self.created_after = Some(after);
        self
    }

    pub fn with_created_before(mut self, before: DateTime<Utc>) -> Self {
        self.created_before = Some(before);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A single condition on one payment field
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `currency` equals the value exactly (case-sensitive)
    CurrencyEq(String),
    /// `amount >= value`
    AmountAtLeast(Decimal),
    /// `amount <= value`
    AmountAtMost(Decimal),
    /// `created_at >= value`
    CreatedAtOrAfter(DateTime<Utc>),
    /// `created_at <= value`
    CreatedAtOrBefore(DateTime<Utc>),
    /// `status` equals the value
    StatusEq(PaymentStatus),
}

impl Clause {
    /// Evaluate the clause against a record
    pub fn matches(&self, payment: &Payment) -> bool {
        match self {
            Clause::CurrencyEq(currency) => payment.currency == *currency,
            Clause::AmountAtLeast(min) => payment.amount >= *min,
            Clause::AmountAtMost(max) => payment.amount <= *max,
            Clause::CreatedAtOrAfter(after) => payment.created_at >= *after,
            Clause::CreatedAtOrBefore(before) => payment.created_at <= *before,
            Clause::StatusEq(status) => payment.status == *status,
        }
    }
}

/// Conjunction of clauses; no clauses means every record matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The predicate that matches every record
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Add a clause with `AND`
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Compile search criteria, one clause per present field
    pub fn from_filter(filter: &PaymentFilter) -> Self {
        let mut predicate = Self::unrestricted();

        // blank currency counts as absent
        if let Some(currency) = filter.currency.as_deref().filter(|c| !c.trim().is_empty()) {
            predicate = predicate.and(Clause::CurrencyEq(currency.to_string()));
        }

        if let Some(min) = filter.min_amount {
            predicate = predicate.and(Clause::AmountAtLeast(min));
        }

        if let Some(max) = filter.max_amount {
            predicate = predicate.and(Clause::AmountAtMost(max));
        }

        if let Some(after) = filter.created_after {
            predicate = predicate.and(Clause::CreatedAtOrAfter(after));
        }

        if let Some(before) = filter.created_before {
            predicate = predicate.and(Clause::CreatedAtOrBefore(before));
        }

        if let Some(status) = filter.status {
            predicate = predicate.and(Clause::StatusEq(status));
        }

        predicate
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause against a record
    pub fn matches(&self, payment: &Payment) -> bool {
        self.clauses.iter().all(|clause| clause.matches(payment))
    }
}

impl From<&PaymentFilter> for Predicate {
    fn from(filter: &PaymentFilter) -> Self {
        Predicate::from_filter(filter)
    }
}
