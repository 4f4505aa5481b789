//! Route definitions for product search.
//!
//! Mounted at `/search` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Search routes mounted at `/search`.
///
/// ```text
/// GET    /                      -> search_products
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search::search_products))
}
