//! Search request and response types.

use catalog_core::search::Page;
use serde::Serialize;
use sqlx::FromRow;

use super::product::ProductItem;

/// Raw search inputs, before normalization and clamping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub brands: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub page: Option<i64>,
    /// Falls back to the configured default page size when absent.
    pub limit: Option<i64>,
}

/// A single facet bucket: value + count.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: i64,
}

/// Facet counts for both filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFacets {
    pub brands: Vec<FacetValue>,
    pub categories: Vec<FacetValue>,
}

/// One page of matching products plus totals and facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub items: Vec<ProductItem>,
    /// Serialized as top-level `page` and `limit` fields.
    #[serde(flatten)]
    pub page: Page,
    pub total: i64,
    pub facets: SearchFacets,
}
