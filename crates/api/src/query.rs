//! Query parameter types for API handlers.

use catalog_db::models::search::SearchRequest;
use serde::Deserialize;

/// Query parameters for `GET /api/search`.
///
/// Multi-select filters are repeated keys: `?brand=Apple&brand=Samsung`.
/// Page and limit are clamped by the search service, never rejected.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text search, partial match on product name.
    pub q: Option<String>,
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        Self {
            text: params.q,
            brands: Some(params.brand),
            categories: Some(params.category),
            page: params.page,
            limit: params.limit,
        }
    }
}
