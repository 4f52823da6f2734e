//! Page resolution for list endpoints
//!
//! Lenient like a paginator behind an HTML list: a page that is not a number
//! shows the first page, and a page out of range shows the last one.

use std::num::IntErrorKind;

use serde::Serialize;

/// Rows per page on every paginated list
pub const PAGE_SIZE: i64 = 25;

/// Resolved position inside a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub per_page: i64,
    pub total: i64,
    pub num_pages: i64,
}

impl PageWindow {
    /// Resolve the raw `page` query parameter against a row count
    pub fn resolve(raw: Option<&str>, total: i64, per_page: i64) -> Self {
        let num_pages = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        let number = match raw.map(str::trim).map(str::parse::<i64>) {
            None => 1,
            Some(Ok(n)) if n < 1 || n > num_pages => num_pages,
            Some(Ok(n)) => n,
            // a well-formed number too large for i64 is still out of range
            Some(Err(e)) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                num_pages
            }
            Some(Err(_)) => 1,
        };
        Self {
            number,
            per_page,
            total,
            num_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            page: self.number,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.num_pages,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
        }
    }
}

/// One page of a list response
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}
