// src/models/pagination.rs

use serde::{Deserialize, Serialize};

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Pagination {
    /// Clamps page and limit to sane bounds. Callers normalize once at the
    /// service boundary so offset arithmetic never sees zero or negatives.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 100),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// total_pages = ceil(total / limit).
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Envelope for a single page of results.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(pagination: &Pagination, total: i64, items: Vec<T>) -> Self {
        Self {
            total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: pagination.total_pages(total),
            items,
        }
    }
}
