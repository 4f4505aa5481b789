//! Catalog search domain logic.
//!
//! Pure, I/O-free building blocks shared by the repository layer and the
//! HTTP layer: pagination arithmetic, filter normalization, and the
//! parameterized predicate builder used to compose search SQL.

pub mod error;
pub mod search;
pub mod types;
