//! "All or one value" filters used by the list screens.

/// Wire value that selects every record.
pub const FILTER_ALL: &str = "all";

/// A list filter over one open-enum field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Filter<T>
where
    T: PartialEq + From<String>,
{
    /// Parse a filter from its wire value. `"all"` selects everything;
    /// any other value filters on that exact value, known or not.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(FILTER_ALL) {
            Self::All
        } else {
            Self::Only(T::from(trimmed.to_string()))
        }
    }

    /// Whether a record with this field value passes the filter.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Like [`matches`](Self::matches) for fields that may be absent.
    /// An absent value only passes the `All` filter.
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Self::All, _) => true,
            (Self::Only(wanted), Some(value)) => wanted == value,
            (Self::Only(_), None) => false,
        }
    }
}
