//! Integration tests for faceted product search.
//!
//! Exercises the repository and the search service against a real database:
//! - Multi-select OR within a dimension, AND across dimensions
//! - Facet self-exclusion and zero-count omission
//! - Pagination over ids (stable ordering, out-of-range pages)
//! - Category aggregation without row multiplication
//! - Failure of any fetch failing the whole search

use assert_matches::assert_matches;
use catalog_core::search::{SearchLimits, SearchQuery};
use catalog_core::types::DbId;
use catalog_db::models::search::{FacetValue, SearchRequest};
use catalog_db::repositories::ProductSearchRepo;
use catalog_db::{QueryError, SearchService};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_brand(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO brands (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_category(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_product(
    pool: &PgPool,
    name: &str,
    brand_id: Option<DbId>,
    category_ids: &[DbId],
) -> DbId {
    let id: DbId =
        sqlx::query_scalar("INSERT INTO products (name, brand_id) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(brand_id)
            .fetch_one(pool)
            .await
            .unwrap();

    for category_id in category_ids {
        sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES ($1, $2)")
            .bind(id)
            .bind(category_id)
            .execute(pool)
            .await
            .unwrap();
    }

    id
}

/// iPhone 14 (Apple; Phones, Electronics), Galaxy S23 (Samsung; Phones),
/// Pixel 8 (Google; Phones).
async fn seed_phones(pool: &PgPool) {
    let apple = insert_brand(pool, "Apple").await;
    let samsung = insert_brand(pool, "Samsung").await;
    let google = insert_brand(pool, "Google").await;
    let phones = insert_category(pool, "Phones").await;
    let electronics = insert_category(pool, "Electronics").await;

    insert_product(pool, "iPhone 14", Some(apple), &[phones, electronics]).await;
    insert_product(pool, "Galaxy S23", Some(samsung), &[phones]).await;
    insert_product(pool, "Pixel 8", Some(google), &[phones]).await;
}

fn service(pool: PgPool) -> SearchService {
    SearchService::new(pool, SearchLimits::default())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn facet(value: &str, count: i64) -> FacetValue {
    FacetValue {
        value: value.to_string(),
        count,
    }
}

fn names(result: &catalog_db::models::search::SearchResult) -> Vec<&str> {
    result.items.iter().map(|i| i.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Filters and facets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn brand_filter_is_or_within_dimension(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            brands: Some(strings(&["Apple", "Samsung"])),
            page: Some(1),
            limit: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(names(&result), vec!["Galaxy S23", "iPhone 14"]);
    assert_eq!(result.total, 2);

    // The brand facet ignores the brand filter.
    assert_eq!(
        result.facets.brands,
        vec![facet("Apple", 1), facet("Google", 1), facet("Samsung", 1)]
    );
    // The category facet honors it.
    assert_eq!(
        result.facets.categories,
        vec![facet("Phones", 2), facet("Electronics", 1)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_filter_excludes_itself_from_category_facet(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            categories: Some(strings(&["Electronics"])),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(names(&result), vec!["iPhone 14"]);
    assert_eq!(result.total, 1);
    assert_eq!(result.facets.brands, vec![facet("Apple", 1)]);
    assert_eq!(
        result.facets.categories,
        vec![facet("Phones", 3), facet("Electronics", 1)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_are_anded_across_dimensions(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            brands: Some(strings(&["Samsung", "Google"])),
            categories: Some(strings(&["Electronics"])),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 0);
    // Brand facet: Electronics only -> Apple.
    assert_eq!(result.facets.brands, vec![facet("Apple", 1)]);
    // Category facet: Samsung or Google -> their categories.
    assert_eq!(result.facets.categories, vec![facet("Phones", 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_filter_is_case_insensitive_partial_match(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            text: Some("  GALAXY ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(names(&result), vec!["Galaxy S23"]);
    assert_eq!(result.total, 1);
    assert_eq!(result.facets.brands, vec![facet("Samsung", 1)]);
    assert_eq!(result.facets.categories, vec![facet("Phones", 1)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_filters_are_ignored(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            text: Some("   ".to_string()),
            brands: Some(strings(&[" ", ""])),
            categories: Some(Vec::new()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.items.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_count_values_are_omitted(pool: PgPool) {
    seed_phones(&pool).await;
    insert_brand(&pool, "Nokia").await;
    insert_category(&pool, "Tablets").await;

    let result = service(pool).search(SearchRequest::default()).await.unwrap();

    assert!(result.facets.brands.iter().all(|f| f.value != "Nokia"));
    assert!(result.facets.categories.iter().all(|f| f.value != "Tablets"));
    assert!(result.facets.brands.iter().all(|f| f.count > 0));
    assert!(result.facets.categories.iter().all(|f| f.count > 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn facets_order_by_count_then_value(pool: PgPool) {
    let beta = insert_brand(&pool, "Beta").await;
    let alpha = insert_brand(&pool, "Alpha").await;
    let gamma = insert_brand(&pool, "Gamma").await;
    let misc = insert_category(&pool, "Misc").await;

    insert_product(&pool, "Gadget One", Some(gamma), &[misc]).await;
    insert_product(&pool, "Gadget Two", Some(gamma), &[misc]).await;
    insert_product(&pool, "Gadget Three", Some(beta), &[misc]).await;
    insert_product(&pool, "Gadget Four", Some(alpha), &[misc]).await;

    let query = SearchQuery::normalize(None, None, None, None, None, &SearchLimits::default());
    let brands = ProductSearchRepo::brand_facet(&pool, &query).await.unwrap();

    assert_eq!(
        brands,
        vec![facet("Gamma", 2), facet("Alpha", 1), facet("Beta", 1)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_facet_breaks_count_ties_by_name(pool: PgPool) {
    let acme = insert_brand(&pool, "Acme").await;
    let zulu = insert_category(&pool, "Zulu").await;
    let alpha = insert_category(&pool, "Alpha").await;
    let mid = insert_category(&pool, "Mid").await;

    insert_product(&pool, "Widget A", Some(acme), &[zulu, mid]).await;
    insert_product(&pool, "Widget B", Some(acme), &[mid]).await;
    insert_product(&pool, "Widget C", Some(acme), &[alpha]).await;

    let query = SearchQuery::normalize(None, None, None, None, None, &SearchLimits::default());
    let categories = ProductSearchRepo::category_facet(&pool, &query).await.unwrap();

    assert_eq!(
        categories,
        vec![facet("Mid", 2), facet("Alpha", 1), facet("Zulu", 1)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn brand_facet_ignores_brand_filter_at_repository_level(pool: PgPool) {
    seed_phones(&pool).await;

    let query = SearchQuery::normalize(
        None,
        Some(strings(&["Apple"])),
        None,
        None,
        None,
        &SearchLimits::default(),
    );

    let brands = ProductSearchRepo::brand_facet(&pool, &query).await.unwrap();
    assert_eq!(brands.len(), 3);

    let total = ProductSearchRepo::count_matching(&pool, &query)
        .await
        .unwrap();
    assert_eq!(total, 1);
}

// ---------------------------------------------------------------------------
// Items and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn items_are_enriched_with_brand_and_sorted_categories(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            text: Some("iphone".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let item = &result.items[0];
    assert_eq!(item.name, "iPhone 14");
    assert_eq!(item.brand.as_ref().map(|b| b.name.as_str()), Some("Apple"));
    assert_eq!(item.categories, strings(&["Electronics", "Phones"]));
    assert_eq!(item.image, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_join_does_not_multiply_rows(pool: PgPool) {
    let brand = insert_brand(&pool, "Acme").await;
    let mut categories = Vec::new();
    for name in ["Alpha", "Beta", "Gamma"] {
        categories.push(insert_category(&pool, name).await);
    }
    insert_product(&pool, "Anvil", Some(brand), &categories).await;
    insert_product(&pool, "Rocket", Some(brand), &categories).await;
    insert_product(&pool, "Spring", Some(brand), &categories).await;

    let result = service(pool)
        .search(SearchRequest {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(names(&result), vec!["Anvil", "Rocket"]);
    assert_eq!(result.total, 3);
    for item in &result.items {
        assert_eq!(item.categories, strings(&["Alpha", "Beta", "Gamma"]));
    }
    assert_eq!(result.facets.brands, vec![facet("Acme", 3)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_is_stable_by_name_then_id(pool: PgPool) {
    let first = insert_product(&pool, "Widget", None, &[]).await;
    let second = insert_product(&pool, "Widget", None, &[]).await;
    let third = insert_product(&pool, "Widget", None, &[]).await;
    let alpha = insert_product(&pool, "Anchor", None, &[]).await;

    let service = service(pool);
    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = service
            .search(SearchRequest {
                page: Some(page),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        seen.extend(result.items.iter().map(|i| i.id));
    }

    assert_eq!(seen, vec![alpha, first, second, third]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_page_returns_empty_items_with_facets(pool: PgPool) {
    seed_phones(&pool).await;

    let result = service(pool)
        .search(SearchRequest {
            page: Some(9999),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 3);
    assert_eq!(result.page.page, 9999);
    assert_eq!(result.page.limit, 1);
    assert!(!result.facets.brands.is_empty());
    assert!(!result.facets.categories.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_and_limit_are_clamped(pool: PgPool) {
    seed_phones(&pool).await;

    let service = SearchService::new(pool, SearchLimits::new(2, 2).unwrap());

    let result = service
        .search(SearchRequest {
            page: Some(-4),
            limit: Some(50),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(result.page.page, 1);
    assert_eq!(result.page.limit, 2);
    assert_eq!(result.items.len(), 2);

    let result = service
        .search(SearchRequest {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(result.page.limit, 1);
    assert_eq!(result.items.len(), 1);

    let result = service.search(SearchRequest::default()).await.unwrap();
    assert_eq!(result.page.limit, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_without_brand_is_counted_but_not_bucketed(pool: PgPool) {
    seed_phones(&pool).await;
    let phones: DbId = sqlx::query_scalar("SELECT id FROM categories WHERE name = 'Phones'")
        .fetch_one(&pool)
        .await
        .unwrap();
    insert_product(&pool, "Generic Phone", None, &[phones]).await;

    let result = service(pool)
        .search(SearchRequest {
            text: Some("phone".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    let generic = result
        .items
        .iter()
        .find(|i| i.name == "Generic Phone")
        .unwrap();
    assert_eq!(generic.brand, None);
    assert_eq!(result.facets.brands, vec![facet("Apple", 1)]);
    assert_eq!(result.facets.categories.first(), Some(&facet("Phones", 2)));
}

// ---------------------------------------------------------------------------
// Safety, determinism and failure
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hostile_input_is_treated_as_data(pool: PgPool) {
    seed_phones(&pool).await;
    let hostile = "'; DROP TABLE products; --";

    let result = service(pool.clone())
        .search(SearchRequest {
            text: Some(hostile.to_string()),
            brands: Some(strings(&[hostile])),
            categories: Some(strings(&[hostile])),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(result.total, 0);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identical_searches_return_identical_results(pool: PgPool) {
    seed_phones(&pool).await;
    let service = service(pool);
    let request = SearchRequest {
        text: Some("a".to_string()),
        categories: Some(strings(&["Phones"])),
        ..Default::default()
    };

    let first = service.search(request.clone()).await.unwrap();
    let second = service.search(request).await.unwrap();

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn data_access_failure_fails_whole_search(pool: PgPool) {
    seed_phones(&pool).await;
    let service = service(pool.clone());
    pool.close().await;

    let err = service.search(SearchRequest::default()).await.unwrap_err();

    assert_matches!(err, QueryError { source: sqlx::Error::PoolClosed, .. });
}
