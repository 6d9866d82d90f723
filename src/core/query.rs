//! Query parameters and pagination utilities

use crate::config::PaginationConfig;
use serde::{Deserialize, Serialize};

/// Query parameters for pagination
///
/// # Example
/// ```text
/// GET /v1/titles?page=2&limit=10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PageParams {
    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Number of items per page; falls back to the configured default
    pub limit: Option<usize>,
}

impl PageParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get limit, clamped to `1..=max_limit`
    pub fn limit(&self, config: &PaginationConfig) -> usize {
        self.limit
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit.max(1))
    }

    /// Slice `items` into the requested page
    pub fn paginate<T>(&self, items: Vec<T>, config: &PaginationConfig) -> PaginatedResponse<T> {
        let page = self.page();
        let limit = self.limit(config);
        let total = items.len();

        let data = items
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        PaginatedResponse {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
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

impl<T> PaginatedResponse<T> {
    /// Transform each item of the page, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = page.saturating_sub(1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

/// Search parameter shared by slug-keyed and user listings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
    /// Case-insensitive substring filter
    pub search: Option<String>,
}

impl SearchParams {
    pub fn matches(&self, haystack: &str) -> bool {
        match &self.search {
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
