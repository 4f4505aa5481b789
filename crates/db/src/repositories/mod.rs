//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod product_search_repo;

pub use product_search_repo::ProductSearchRepo;
