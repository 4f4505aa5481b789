#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::search::SearchLimits;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        search_limits: SearchLimits::default(),
        db_max_connections: 5,
        db_min_connections: 1,
        db_statement_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Issue a GET request against the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn insert_named(pool: &PgPool, table: &str, name: &str) -> i64 {
    sqlx::query_scalar(&format!("INSERT INTO {table} (name) VALUES ($1) RETURNING id"))
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// iPhone 14 (Apple; Phones, Electronics), Galaxy S23 (Samsung; Phones),
/// Pixel 8 (Google; Phones).
pub async fn seed_phones(pool: &PgPool) {
    let apple = insert_named(pool, "brands", "Apple").await;
    let samsung = insert_named(pool, "brands", "Samsung").await;
    let google = insert_named(pool, "brands", "Google").await;
    let phones = insert_named(pool, "categories", "Phones").await;
    let electronics = insert_named(pool, "categories", "Electronics").await;

    let products = vec![
        ("iPhone 14", apple, vec![phones, electronics]),
        ("Galaxy S23", samsung, vec![phones]),
        ("Pixel 8", google, vec![phones]),
    ];

    for (name, brand_id, category_ids) in products {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO products (name, brand_id) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(brand_id)
                .fetch_one(pool)
                .await
                .unwrap();

        for category_id in category_ids {
            sqlx::query(
                "INSERT INTO product_categories (product_id, category_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(category_id)
            .execute(pool)
            .await
            .unwrap();
        }
    }
}
