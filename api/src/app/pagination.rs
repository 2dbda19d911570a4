//! Page/offset arithmetic for curse listings

use serde::Serialize;

use crate::config::ConfigError;

/// Pagination settings fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorConfig {
    /// Page size used when the request does not ask for a valid one
    pub default_limit: u64,
}

impl PaginatorConfig {
    /// Parse the configured default limit. It must be a positive integer.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            name: "PAGINATOR_LIMIT_DEFAULT",
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let default_limit: u64 = raw
            .trim()
            .parse()
            .map_err(|_| invalid("expected a positive integer"))?;
        if default_limit == 0 {
            return Err(invalid("must be greater than zero"));
        }

        Ok(Self { default_limit })
    }
}

/// Pagination metadata returned alongside a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub page: u64,
    pub per_page: u64,
    pub page_count: u64,
    pub total_count: u64,
}

impl Meta {
    /// Resolve the requested page and limit against the total row count.
    ///
    /// - `per_page <= 0` falls back to the configured default
    /// - `page` past the last page is clamped to the last page
    /// - `page < 1` (or an empty result) becomes page 1
    pub fn new(page: i64, per_page: i64, total_count: u64, config: &PaginatorConfig) -> Self {
        let per_page = if per_page > 0 {
            per_page as u64
        } else {
            config.default_limit
        };
        let page_count = total_count.div_ceil(per_page);

        let mut page = page.max(0) as u64;
        if page > page_count {
            page = page_count;
        }
        let page = page.max(1);

        Self {
            page,
            per_page,
            page_count,
            total_count,
        }
    }

    /// Rows to skip for the current page
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Rows to fetch for the current page
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}
