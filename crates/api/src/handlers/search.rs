//! Handler for faceted product search.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::{Query, WithRejection};
use catalog_core::search::validate_query_text;
use catalog_db::models::search::SearchResult;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::state::AppState;

/// GET /api/search
///
/// Returns one page of matching products, the total match count, and brand
/// and category facets as a bare `SearchResult`. Overlong free text and
/// unparsable query strings are rejected with 400; every other input is
/// normalized by the search service.
pub async fn search_products(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, AppError>,
) -> AppResult<Json<SearchResult>> {
    if let Some(q) = params.q.as_deref() {
        validate_query_text(q)?;
    }

    let result = state.search.search(params.into()).await?;

    tracing::debug!(
        total = result.total,
        items = result.items.len(),
        page = result.page.page,
        "Search request served",
    );

    Ok(Json(result))
}
