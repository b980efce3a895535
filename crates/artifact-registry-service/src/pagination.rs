//! Pagination parameters
//!
//! Turns raw `page` / `size` request parameters into an offset and limit for
//! the query layer, and derives the page counter handed to the envelope
//! builders.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Pagination limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: i32,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i32,
}

fn default_page_size() -> i32 {
    10
}

fn default_max_page_size() -> i32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Raw pagination parameters as they arrive on a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index
    #[serde(default)]
    pub page: Option<i64>,

    /// Page size
    #[serde(default)]
    pub size: Option<i32>,
}

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    /// 1-based page index
    pub page_index: i64,

    /// Page size
    pub page_size: i32,

    /// Number of items to skip
    pub offset: i64,

    /// Number of items to fetch
    pub limit: i64,
}

impl PageRequest {
    /// Create a request for a specific page and size
    pub fn new(page: i64, size: i32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Apply defaults and limits
    pub fn resolve(&self, config: &PaginationConfig) -> ServiceResult<ResolvedPage> {
        let page_index = self.page.unwrap_or(1);
        let page_size = self.size.unwrap_or(config.default_page_size);

        if page_index < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "Page must be at least 1, got {}",
                page_index
            )));
        }
        if page_size < 1 {
            return Err(ServiceError::InvalidInput(format!(
                "Page size must be positive, got {}",
                page_size
            )));
        }
        if page_size > config.max_page_size {
            return Err(ServiceError::InvalidInput(format!(
                "Page size cannot exceed {}",
                config.max_page_size
            )));
        }

        let offset = (page_index - 1)
            .checked_mul(i64::from(page_size))
            .ok_or_else(|| ServiceError::InvalidInput("Page is out of range".to_string()))?;

        Ok(ResolvedPage {
            page_index,
            page_size,
            offset,
            limit: i64::from(page_size),
        })
    }
}

/// Number of pages needed for `item_count` items
///
/// Returns 0 when there are no items or the page size is not positive.
pub fn page_count(item_count: i64, page_size: i32) -> i64 {
    if item_count <= 0 || page_size <= 0 {
        return 0;
    }
    let page_size = i64::from(page_size);
    let full_pages = item_count / page_size;
    if item_count % page_size == 0 {
        full_pages
    } else {
        full_pages + 1
    }
}
