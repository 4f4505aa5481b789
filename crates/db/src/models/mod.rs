//! Row models and search DTOs.

pub mod product;
pub mod search;
