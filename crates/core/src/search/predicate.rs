//! Parameterized WHERE-clause construction for product search.
//!
//! Filters are expressed as tagged [`Predicate`]s. Each predicate renders a
//! fixed SQL fragment that references its value only through a positional
//! placeholder, so user input never reaches the SQL text. The resulting
//! [`WhereClause`] keeps the fragment, the bound values and the next free
//! placeholder index together so callers can append further parameters
//! (e.g. `LIMIT`/`OFFSET`) without renumbering.
//!
//! The SQL assumes the enclosing query aliases `products` as `p` and
//! left-joins `brands` as `b`.

use super::filters::FilterValues;

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    /// Bound as a single `text[]` parameter.
    TextArray(Vec<String>),
    BigInt(i64),
}

/// Which multi-select dimensions a query honors.
///
/// The free-text filter always applies. Facet queries switch off their own
/// dimension so a facet never filters itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub brand: bool,
    pub category: bool,
}

impl Dimensions {
    /// Items and total count: every active filter applies.
    pub const ALL: Self = Self {
        brand: true,
        category: true,
    };

    /// Brand facet: ignore the brand filter.
    pub const EXCLUDING_BRAND: Self = Self {
        brand: false,
        category: true,
    };

    /// Category facet: ignore the category filter.
    pub const EXCLUDING_CATEGORY: Self = Self {
        brand: true,
        category: false,
    };
}

/// A single filtering condition and the value it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on the product name.
    NameContains(String),
    /// Product brand name is one of the values.
    BrandIn(Vec<String>),
    /// Product belongs to at least one category with one of the names.
    CategoryIn(Vec<String>),
}

impl Predicate {
    /// Render the SQL fragment, referencing the bound value as `$index`.
    pub fn to_sql(&self, index: usize) -> String {
        match self {
            Predicate::NameContains(_) => format!("p.name ILIKE '%' || ${index} || '%'"),
            Predicate::BrandIn(_) => format!("b.name = ANY(${index}::text[])"),
            Predicate::CategoryIn(_) => format!(
                "EXISTS (SELECT 1 FROM product_categories pc \
                 JOIN categories c ON c.id = pc.category_id \
                 WHERE pc.product_id = p.id AND c.name = ANY(${index}::text[]))"
            ),
        }
    }

    pub fn into_param(self) -> SqlParam {
        match self {
            Predicate::NameContains(text) => SqlParam::Text(text),
            Predicate::BrandIn(names) | Predicate::CategoryIn(names) => {
                SqlParam::TextArray(names)
            }
        }
    }
}

/// Collect the predicates that apply, in emission order: text, brand, category.
pub fn collect_predicates(
    dimensions: Dimensions,
    text: Option<&str>,
    brands: &FilterValues,
    categories: &FilterValues,
) -> Vec<Predicate> {
    let mut predicates = Vec::with_capacity(3);

    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        predicates.push(Predicate::NameContains(text.to_string()));
    }

    if dimensions.brand {
        if let Some(names) = brands.values() {
            predicates.push(Predicate::BrandIn(names.to_vec()));
        }
    }

    if dimensions.category {
        if let Some(names) = categories.values() {
            predicates.push(Predicate::CategoryIn(names.to_vec()));
        }
    }

    predicates
}

/// A rendered WHERE clause plus its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    sql: String,
    params: Vec<SqlParam>,
    next_index: usize,
}

impl WhereClause {
    /// Render `predicates` joined with `AND`.
    ///
    /// Values are appended to `params` in predicate order, starting at
    /// placeholder `$start_index`. No predicates means an empty clause (no
    /// `WHERE` keyword).
    pub fn from_predicates(
        predicates: Vec<Predicate>,
        mut params: Vec<SqlParam>,
        start_index: usize,
    ) -> Self {
        let mut index = start_index;
        let mut parts = Vec::with_capacity(predicates.len());

        for predicate in predicates {
            parts.push(predicate.to_sql(index));
            params.push(predicate.into_param());
            index += 1;
        }

        let sql = if parts.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", parts.join(" AND "))
        };

        Self {
            sql,
            params,
            next_index: index,
        }
    }

    /// The clause text, starting with `WHERE`, or empty.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Placeholder index the next appended parameter will use.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Append a parameter after the clause's own and return its placeholder index.
    pub fn bind(&mut self, param: SqlParam) -> usize {
        let index = self.next_index;
        self.params.push(param);
        self.next_index += 1;
        index
    }

    pub fn into_parts(self) -> (String, Vec<SqlParam>, usize) {
        (self.sql, self.params, self.next_index)
    }
}

/// Build the WHERE clause for a search context.
///
/// `dimensions` selects which multi-select filters participate; passing
/// [`Dimensions::EXCLUDING_BRAND`] or [`Dimensions::EXCLUDING_CATEGORY`]
/// yields the self-excluding facet predicates. `params` may already hold
/// values for placeholders below `start_index`.
pub fn build_where_clause(
    dimensions: Dimensions,
    text: Option<&str>,
    brands: &FilterValues,
    categories: &FilterValues,
    params: Vec<SqlParam>,
    start_index: usize,
) -> WhereClause {
    let predicates = collect_predicates(dimensions, text, brands, categories);
    WhereClause::from_predicates(predicates, params, start_index)
}
