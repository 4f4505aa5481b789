pub mod health;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree, mounted at both `/api` and `/api/v1`.
///
/// ```text
/// /search                                          faceted product search (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/search", search::router())
}
