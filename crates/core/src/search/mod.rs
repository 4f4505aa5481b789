//! Product search constants and helpers.
//!
//! This module lives in `core` (zero internal deps) so the repository layer
//! and the HTTP layer share one definition of how a raw request becomes a
//! normalized [`SearchQuery`].

pub mod filters;
pub mod pagination;
pub mod predicate;

pub use filters::{normalize_filter, normalize_text, FilterValues, NonEmptyValues};
pub use pagination::{clamp_limit, clamp_page, offset, Page};
pub use predicate::{build_where_clause, Dimensions, Predicate, SqlParam, WhereClause};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of products per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of products per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Longest free-text term the HTTP layer accepts before calling search.
pub const MAX_QUERY_TEXT_LENGTH: usize = 200;

/// Page-size policy applied to every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    default_limit: i64,
    max_limit: i64,
}

impl SearchLimits {
    /// Build limits from configuration values.
    ///
    /// `max_limit` must be at least 1. A `default_limit` above the maximum is
    /// capped to it; a non-positive default is rejected.
    pub fn new(default_limit: i64, max_limit: i64) -> Result<Self, CoreError> {
        if max_limit < 1 {
            return Err(CoreError::Validation(format!(
                "max limit must be at least 1, got {max_limit}"
            )));
        }
        if default_limit < 1 {
            return Err(CoreError::Validation(format!(
                "default limit must be at least 1, got {default_limit}"
            )));
        }
        Ok(Self {
            default_limit: default_limit.min(max_limit),
            max_limit,
        })
    }

    pub fn default_limit(&self) -> i64 {
        self.default_limit
    }

    pub fn max_limit(&self) -> i64 {
        self.max_limit
    }

    /// Resolve a raw page/limit pair into a clamped [`Page`].
    ///
    /// An absent limit falls back to the configured default.
    pub fn page(&self, page: Option<i64>, limit: Option<i64>) -> Page {
        Page::new(
            clamp_page(page),
            clamp_limit(limit.unwrap_or(self.default_limit), self.max_limit),
        )
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_LIMIT,
            max_limit: MAX_SEARCH_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized query
// ---------------------------------------------------------------------------

/// A search request after trimming, filter normalization and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed, non-empty free text.
    pub text: Option<String>,
    pub brands: FilterValues,
    pub categories: FilterValues,
    pub page: Page,
}

impl SearchQuery {
    /// Normalize raw request inputs.
    ///
    /// Never fails: blank text and blank filter entries collapse to "no
    /// filter", and page/limit are clamped by `limits`.
    pub fn normalize(
        text: Option<&str>,
        brands: Option<Vec<String>>,
        categories: Option<Vec<String>>,
        page: Option<i64>,
        limit: Option<i64>,
        limits: &SearchLimits,
    ) -> Self {
        Self {
            text: normalize_text(text),
            brands: normalize_filter(brands),
            categories: normalize_filter(categories),
            page: limits.page(page, limit),
        }
    }

    /// WHERE clause for the given dimension selection, numbering from `$1`.
    pub fn where_clause(&self, dimensions: Dimensions) -> WhereClause {
        build_where_clause(
            dimensions,
            self.text.as_deref(),
            &self.brands,
            &self.categories,
            Vec::new(),
            1,
        )
    }
}

/// Reject free text that exceeds [`MAX_QUERY_TEXT_LENGTH`] characters.
pub fn validate_query_text(text: &str) -> Result<(), CoreError> {
    let len = text.trim().chars().count();
    if len > MAX_QUERY_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "search text must be at most {MAX_QUERY_TEXT_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
