//! Normalization of free text and multi-select filter lists.

/// A list of filter values that always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyValues(Vec<String>);

impl NonEmptyValues {
    /// `None` when `values` is empty.
    pub fn new(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self(values))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// A multi-select filter: either inactive or a non-empty list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterValues {
    #[default]
    Absent,
    Present(NonEmptyValues),
}

impl FilterValues {
    /// Build from already-clean values; an empty list is [`FilterValues::Absent`].
    pub fn from_values(values: Vec<String>) -> Self {
        NonEmptyValues::new(values).map_or(FilterValues::Absent, FilterValues::Present)
    }

    /// The active values, or `None` when the filter does not apply.
    pub fn values(&self) -> Option<&[String]> {
        match self {
            FilterValues::Present(values) => Some(values.as_slice()),
            FilterValues::Absent => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FilterValues::Present(_))
    }
}

/// Trim each entry and drop blank ones.
///
/// Duplicates and relative order are preserved. Absent input and input with
/// only blank entries both become [`FilterValues::Absent`].
///
/// # Examples
///
/// ```
/// use catalog_core::search::{normalize_filter, FilterValues};
/// let raw = vec![" ".to_string(), "".to_string(), "Apple ".to_string()];
/// assert_eq!(
///     normalize_filter(Some(raw)).values(),
///     Some(&["Apple".to_string()][..])
/// );
/// assert_eq!(normalize_filter(Some(vec![])), FilterValues::Absent);
/// ```
pub fn normalize_filter(values: Option<Vec<String>>) -> FilterValues {
    let cleaned: Vec<String> = values
        .unwrap_or_default()
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    FilterValues::from_values(cleaned)
}

/// Trim free text; blank text means "no text filter".
pub fn normalize_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
