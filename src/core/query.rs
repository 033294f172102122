//! Pagination and sorting

use crate::core::error::ValidationError;
use crate::core::payment::Payment;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable payment fields
///
/// Parsed from the external (camelCase) field name; anything else is
/// rejected with [`ValidationError::UnknownSortField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[serde(rename = "guid")]
    Id,
    InquiryRefId,
    Amount,
    Currency,
    TransactionRefId,
    Status,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl SortField {
    /// External field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "guid",
            SortField::InquiryRefId => "inquiryRefId",
            SortField::Amount => "amount",
            SortField::Currency => "currency",
            SortField::TransactionRefId => "transactionRefId",
            SortField::Status => "status",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Storage column name
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::InquiryRefId => "inquiry_ref_id",
            SortField::Amount => "amount",
            SortField::Currency => "currency",
            SortField::TransactionRefId => "transaction_ref_id",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Compare two payments on this field
    ///
    /// Absent values sort after present ones. The caller applies direction
    /// to the present-vs-present case only, so absent values stay last
    /// in both directions.
    fn compare(&self, a: &Payment, b: &Payment, direction: SortDirection) -> Ordering {
        let directed = |ord: Ordering| match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };

        match self {
            SortField::Id => directed(a.id.cmp(&b.id)),
            SortField::InquiryRefId => directed(a.inquiry_ref_id.cmp(&b.inquiry_ref_id)),
            SortField::Amount => directed(a.amount.cmp(&b.amount)),
            SortField::Currency => directed(a.currency.cmp(&b.currency)),
            SortField::Status => directed(a.status.as_str().cmp(b.status.as_str())),
            SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
            SortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at)),
            SortField::TransactionRefId => match (a.transaction_ref_id, b.transaction_ref_id) {
                (Some(x), Some(y)) => directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guid" | "id" => Ok(SortField::Id),
            "inquiryRefId" => Ok(SortField::InquiryRefId),
            "amount" => Ok(SortField::Amount),
            "currency" => Ok(SortField::Currency),
            "transactionRefId" => Ok(SortField::TransactionRefId),
            "status" => Ok(SortField::Status),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(ValidationError::UnknownSortField {
                field: other.to_string(),
            }),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `desc` (any case) is descending; everything else is ascending
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Total order for payments: the requested field, then `id` ascending
    pub fn compare(&self, a: &Payment, b: &Payment) -> Ordering {
        self.field
            .compare(a, b, self.direction)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// A zero-indexed page window with its sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
    sort: Sort,
}

impl PageRequest {
    /// Build a page request from external parameters
    ///
    /// Fails on an unknown sort field or a zero page size. The page size has
    /// no upper bound here; bounding it is the transport's concern.
    pub fn new(
        page: usize,
        page_size: usize,
        sort_field: &str,
        sort_direction: &str,
    ) -> Result<Self, ValidationError> {
        let field = SortField::from_str(sort_field)?;
        Self::with_sort(
            page,
            page_size,
            Sort::new(field, SortDirection::parse_lenient(sort_direction)),
        )
    }

    pub fn with_sort(page: usize, page_size: usize, sort: Sort) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::FieldError {
                field: "size".to_string(),
                message: "page size must be at least 1".to_string(),
            });
        }
        Ok(Self {
            page,
            page_size,
            sort,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of records before this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// One page of results plus the size of the full matching set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let pagination = PaginationMeta::new(page.page, page.page_size, page.total);
        Self {
            data: page.items,
            pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 0)
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Total number of items (after filters)
    pub total: u64,

    /// Total number of pages
    pub total_pages: u64,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, size: usize, total: u64) -> Self {
        let size = size.max(1);
        let total_pages = total.div_ceil(size as u64);

        Self {
            page,
            size,
            total,
            total_pages,
            has_next: (page as u64).saturating_add(1) < total_pages,
            has_prev: page > 0,
        }
    }
}
