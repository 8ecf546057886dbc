//! The pagination envelope shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside every list response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed).
    pub current: i64,
    /// Page size the server applied.
    pub limit: i64,
    /// Total number of records matching the filters.
    pub records: i64,
    /// Total number of pages, `ceil(records / limit)`.
    pub pages: i64,
}

impl Pagination {
    /// Builds the metadata for a page, deriving `pages` from `records` and `limit`.
    pub fn new(current: i64, limit: i64, records: i64) -> Self {
        let pages = if limit > 0 {
            (records + limit - 1) / limit
        } else {
            0
        };
        Self {
            current,
            limit,
            records,
            pages,
        }
    }

    /// Number of rows to skip to reach the current page.
    pub fn offset(&self) -> i64 {
        (self.current - 1).max(0) * self.limit
    }
}

/// A page of records: `{ "pagination": {...}, "data": [...] }`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Page<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: Pagination, data: Vec<T>) -> Self {
        Self { pagination, data }
    }

    /// Converts every record of the page, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            pagination: self.pagination,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
