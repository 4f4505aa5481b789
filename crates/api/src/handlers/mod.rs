//! Request handlers.
//!
//! Handlers delegate to `catalog_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod search;
