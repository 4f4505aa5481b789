//! Search orchestration.
//!
//! [`SearchService`] owns an injected pool handle and turns a raw
//! [`SearchRequest`] into a complete [`SearchResult`].

use std::future::Future;
use std::time::Instant;

use catalog_core::search::{SearchLimits, SearchQuery};

use crate::error::{QueryError, SearchStage};
use crate::models::search::{SearchFacets, SearchRequest, SearchResult};
use crate::repositories::ProductSearchRepo;
use crate::DbPool;

/// Runs faceted product searches against a connection pool.
///
/// Stateless apart from the pool handle and page-size limits; cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchService {
    pool: DbPool,
    limits: SearchLimits,
}

impl SearchService {
    pub fn new(pool: DbPool, limits: SearchLimits) -> Self {
        Self { pool, limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Normalize `request` and run the search.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResult, QueryError> {
        let query = SearchQuery::normalize(
            request.text.as_deref(),
            request.brands,
            request.categories,
            request.page,
            request.limit,
            &self.limits,
        );
        self.run(&query).await
    }

    /// Run an already-normalized query.
    ///
    /// The four reads are independent and run concurrently, each on its own
    /// pooled connection. The first failure fails the whole search.
    pub async fn run(&self, query: &SearchQuery) -> Result<SearchResult, QueryError> {
        let start = Instant::now();

        let (items, total, brands, categories) = tokio::try_join!(
            stage(
                SearchStage::Items,
                ProductSearchRepo::fetch_items(&self.pool, query)
            ),
            stage(
                SearchStage::Total,
                ProductSearchRepo::count_matching(&self.pool, query)
            ),
            stage(
                SearchStage::BrandFacet,
                ProductSearchRepo::brand_facet(&self.pool, query)
            ),
            stage(
                SearchStage::CategoryFacet,
                ProductSearchRepo::category_facet(&self.pool, query)
            ),
        )?;

        tracing::debug!(
            text = ?query.text,
            brands = ?query.brands.values(),
            categories = ?query.categories.values(),
            page = query.page.page,
            limit = query.page.limit,
            total,
            items = items.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search executed",
        );

        Ok(SearchResult {
            items,
            page: query.page,
            total,
            facets: SearchFacets { brands, categories },
        })
    }
}

/// Tag a repository failure with the stage that produced it.
async fn stage<T, F>(stage: SearchStage, fetch: F) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    fetch.await.map_err(|source| {
        tracing::error!(stage = %stage, error = %source, "Search query failed");
        QueryError::new(stage, source)
    })
}
