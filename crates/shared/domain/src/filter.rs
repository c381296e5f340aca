//! Per-entity search filter whitelists.
//!
//! Each entity exposes a closed set of searchable fields. Wire names are
//! turned into a typed filter here, so repositories never see a raw column
//! name.

use thiserror::Error;

/// Rejections raised before a search reaches storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search value must not be empty")]
    EmptyValue,

    #[error("unsupported search filter '{0}'")]
    UnsupportedFilter(String),

    #[error("a search filter is required")]
    MissingFilter,

    #[error("only one search filter may be supplied")]
    MultipleFilters,
}

/// How a filter value is compared with stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive substring match (free text)
    Contains,
    /// Whole-value equality (enums and identifiers)
    Exact,
}

impl MatchMode {
    /// In-memory counterpart of the SQL comparison.
    pub fn matches(&self, stored: &str, value: &str) -> bool {
        match self {
            MatchMode::Contains => stored.contains(value),
            MatchMode::Exact => stored == value,
        }
    }
}

/// Behaviour shared by the per-entity filter enums.
pub trait SearchFilter: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn match_mode(&self) -> MatchMode;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|filter| filter.as_str() == name)
    }

    fn is_valid(name: &str) -> bool {
        Self::parse(name).is_some()
    }
}

/// Check a search request: the value must be non-blank and the filter
/// whitelisted, in that order.
pub fn validate_search<'v, F: SearchFilter>(filter: &str, value: &'v str) -> Result<(F, &'v str), SearchError> {
    if value.trim().is_empty() {
        return Err(SearchError::EmptyValue);
    }
    let filter = F::parse(filter).ok_or_else(|| SearchError::UnsupportedFilter(filter.to_string()))?;
    Ok((filter, value))
}

macro_rules! search_filter {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => ($value:literal, $mode:ident) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl SearchFilter for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }

            fn match_mode(&self) -> MatchMode {
                match self {
                    $( $name::$variant => MatchMode::$mode ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

search_filter! {
    /// Searchable user fields
    pub enum UserFilter {
        Name => ("name", Contains),
        Email => ("email", Contains),
        Role => ("role", Exact),
    }
}

search_filter! {
    /// Searchable task fields
    pub enum TaskFilter {
        Title => ("title", Contains),
        Priority => ("priority", Exact),
        Status => ("status", Exact),
        AuthorId => ("author_id", Exact),
        ProjectId => ("project_id", Exact),
    }
}

search_filter! {
    /// Searchable project fields
    pub enum ProjectFilter {
        Title => ("title", Contains),
        ManagerId => ("manager_id", Exact),
    }
}
