//! Core module containing the payment model, search types and lifecycle service

pub mod dto;
pub mod error;
pub mod filter;
pub mod payment;
pub mod query;
pub mod service;
pub mod store;

pub use dto::{NoteUpdateDto, PaymentDto, StatusUpdateDto};
pub use error::{
    ConfigError, ErrorResponse, FieldValidationError, NotFoundError, Operation, PaymentError,
    PaymentResult, StorageError, ValidationError,
};
pub use filter::{Clause, PaymentFilter, Predicate};
pub use payment::{Payment, PaymentInput, PaymentStatus};
pub use query::{Page, PageRequest, PaginatedResponse, PaginationMeta, Sort, SortDirection, SortField};
pub use service::PaymentService;
pub use store::PaymentStore;
