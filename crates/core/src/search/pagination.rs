//! Page-number pagination arithmetic.

use serde::Serialize;

/// A clamped 1-based page and its page size.
///
/// Both fields are always at least 1 when built through [`clamp_page`] and
/// [`clamp_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        offset(self.page, self.limit)
    }
}

/// Clamp a user-provided page number: absent, zero and negative become 1.
///
/// There is no upper bound; a page past the end yields an empty item list.
pub fn clamp_page(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p > 0 => p,
        _ => 1,
    }
}

/// Clamp a user-provided page size to `1..=max_limit`.
pub fn clamp_limit(limit: i64, max_limit: i64) -> i64 {
    if limit <= 0 {
        return 1;
    }
    limit.min(max_limit)
}

/// `(page - 1) * limit`, saturating instead of overflowing for huge pages.
pub fn offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}
