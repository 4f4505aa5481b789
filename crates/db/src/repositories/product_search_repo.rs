//! Repository for faceted product search.
//!
//! Every query is assembled from a [`WhereClause`] built in `catalog_core`,
//! so the SQL text only ever contains fixed fragments and positional
//! placeholders. Values travel separately as bound parameters.

use catalog_core::search::{Dimensions, SearchQuery, SqlParam, WhereClause};
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, PgPool};

use crate::models::product::{ProductItem, ProductRow};
use crate::models::search::FacetValue;

/// Provides the read queries behind a search.
pub struct ProductSearchRepo;

impl ProductSearchRepo {
    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Fetch one page of matching products, enriched with brand and categories.
    ///
    /// `LIMIT`/`OFFSET` apply to the id selection, ordered by name then id.
    /// Only the page's ids are joined to categories, so the category
    /// aggregation never runs over the full filtered set and never
    /// multiplies rows.
    pub async fn fetch_items(
        pool: &PgPool,
        query: &SearchQuery,
    ) -> Result<Vec<ProductItem>, sqlx::Error> {
        let mut clause = query.where_clause(Dimensions::ALL);
        let limit_idx = clause.bind(SqlParam::BigInt(query.page.limit));
        let offset_idx = clause.bind(SqlParam::BigInt(query.page.offset()));

        let sql = format!(
            "WITH filtered AS ( \
                 SELECT p.id \
                 FROM products p \
                 LEFT JOIN brands b ON b.id = p.brand_id \
                 {where_sql} \
                 ORDER BY p.name ASC, p.id ASC \
                 LIMIT ${limit_idx} OFFSET ${offset_idx} \
             ) \
             SELECT p.id, p.name, p.image, p.created_at, \
                    b.id AS brand_id, b.name AS brand_name, \
                    COALESCE( \
                        array_agg(DISTINCT c.name ORDER BY c.name) FILTER (WHERE c.name IS NOT NULL), \
                        '{{}}'::text[] \
                    ) AS categories \
             FROM filtered f \
             JOIN products p ON p.id = f.id \
             LEFT JOIN brands b ON b.id = p.brand_id \
             LEFT JOIN product_categories pc ON pc.product_id = p.id \
             LEFT JOIN categories c ON c.id = pc.category_id \
             GROUP BY p.id, b.id, b.name \
             ORDER BY p.name ASC, p.id ASC",
            where_sql = clause.sql(),
        );

        let rows = sqlx::query_as_with::<_, ProductRow, _>(&sql, arguments(clause.params())?)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(ProductItem::from).collect())
    }

    // -----------------------------------------------------------------------
    // Total
    // -----------------------------------------------------------------------

    /// Count all products matching every active filter.
    pub async fn count_matching(pool: &PgPool, query: &SearchQuery) -> Result<i64, sqlx::Error> {
        let clause = query.where_clause(Dimensions::ALL);

        let sql = format!(
            "SELECT COUNT(*) \
             FROM products p \
             LEFT JOIN brands b ON b.id = p.brand_id \
             {where_sql}",
            where_sql = clause.sql(),
        );

        sqlx::query_scalar_with::<_, i64, _>(&sql, arguments(clause.params())?)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Facets
    // -----------------------------------------------------------------------

    /// Count distinct matching products per brand name.
    ///
    /// Honors the text and category filters, ignores the brand filter.
    /// Products without a brand are not counted. Ordered by count descending,
    /// then name.
    pub async fn brand_facet(
        pool: &PgPool,
        query: &SearchQuery,
    ) -> Result<Vec<FacetValue>, sqlx::Error> {
        let clause = query.where_clause(Dimensions::EXCLUDING_BRAND);

        let sql = format!(
            "WITH base AS ( \
                 SELECT p.id, p.brand_id \
                 FROM products p \
                 LEFT JOIN brands b ON b.id = p.brand_id \
                 {where_sql} \
             ) \
             SELECT br.name AS value, COUNT(DISTINCT base.id) AS count \
             FROM base \
             JOIN brands br ON br.id = base.brand_id \
             GROUP BY br.name \
             HAVING COUNT(DISTINCT base.id) > 0 \
             ORDER BY count DESC, br.name ASC",
            where_sql = clause.sql(),
        );

        Self::fetch_facet(pool, &sql, &clause).await
    }

    /// Count distinct matching products per category name.
    ///
    /// Honors the text and brand filters, ignores the category filter.
    pub async fn category_facet(
        pool: &PgPool,
        query: &SearchQuery,
    ) -> Result<Vec<FacetValue>, sqlx::Error> {
        let clause = query.where_clause(Dimensions::EXCLUDING_CATEGORY);

        let sql = format!(
            "WITH base AS ( \
                 SELECT p.id \
                 FROM products p \
                 LEFT JOIN brands b ON b.id = p.brand_id \
                 {where_sql} \
             ) \
             SELECT c.name AS value, COUNT(DISTINCT pc.product_id) AS count \
             FROM base \
             JOIN product_categories pc ON pc.product_id = base.id \
             JOIN categories c ON c.id = pc.category_id \
             GROUP BY c.name \
             HAVING COUNT(DISTINCT pc.product_id) > 0 \
             ORDER BY count DESC, c.name ASC",
            where_sql = clause.sql(),
        );

        Self::fetch_facet(pool, &sql, &clause).await
    }

    async fn fetch_facet(
        pool: &PgPool,
        sql: &str,
        clause: &WhereClause,
    ) -> Result<Vec<FacetValue>, sqlx::Error> {
        sqlx::query_as_with::<_, FacetValue, _>(sql, arguments(clause.params())?)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Encode the clause parameters in placeholder order.
fn arguments(params: &[SqlParam]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for param in params {
        match param {
            SqlParam::Text(text) => args.add(text.as_str()),
            SqlParam::TextArray(values) => args.add(values.as_slice()),
            SqlParam::BigInt(value) => args.add(*value),
        }
        .map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
