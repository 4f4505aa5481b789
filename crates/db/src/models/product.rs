//! Product rows as returned by the item page query.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One enriched row of the item page query.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub brand_id: Option<DbId>,
    pub brand_name: Option<String>,
    /// Distinct category names, sorted.
    pub categories: Vec<String>,
}

/// Brand reference embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandRef {
    pub id: DbId,
    pub name: String,
}

/// A product as it appears in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductItem {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub brand: Option<BrandRef>,
    pub categories: Vec<String>,
}

impl From<ProductRow> for ProductItem {
    fn from(row: ProductRow) -> Self {
        let brand = match (row.brand_id, row.brand_name) {
            (Some(id), Some(name)) => Some(BrandRef { id, name }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            brand,
            categories: row.categories,
        }
    }
}
