use std::fmt;

/// The independent fetches a search is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Items,
    Total,
    BrandFacet,
    CategoryFacet,
}

impl SearchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStage::Items => "items",
            SearchStage::Total => "total",
            SearchStage::BrandFacet => "brand facet",
            SearchStage::CategoryFacet => "category facet",
        }
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data-access failure during search. Never retried.
#[derive(Debug, thiserror::Error)]
#[error("Search {stage} query failed: {source}")]
pub struct QueryError {
    pub stage: SearchStage,
    #[source]
    pub source: sqlx::Error,
}

impl QueryError {
    pub fn new(stage: SearchStage, source: sqlx::Error) -> Self {
        Self { stage, source }
    }
}
