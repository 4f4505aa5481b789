//! Column types shared by the catalog tables.

/// Brand, category and product ids (`BIGSERIAL`).
pub type DbId = i64;

/// `TIMESTAMPTZ` columns, read back in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
