//! List-query resolution and pagination math.
//!
//! Admin list screens send their filter state as URL query parameters
//! (`page`, `perPage`, `search`, `sortBy`, `sortOrder`, plus entity-specific
//! filter keys). The functions here translate that raw string mapping into a
//! validated query descriptor; the repository layer turns the descriptor into
//! a predicate + ORDER BY + OFFSET/LIMIT.
//!
//! Resolution is deliberately permissive: malformed numbers fall back to
//! defaults, unknown sort keys fall back to the creation timestamp, and page
//! numbers past the end of the result set produce an empty page rather than
//! an error. `perPage` carries no upper bound, matching the behavior the
//! admin UI relies on (see DESIGN.md).

use serde::Serialize;

/// Default page number when `page` is absent or malformed.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when `perPage` is absent or malformed.
pub const DEFAULT_PER_PAGE: i64 = 5;

/// Sentinel value meaning "no constraint" for categorical filter keys.
pub const FILTER_ALL: &str = "ALL";

// ---------------------------------------------------------------------------
// Parameter parsing
// ---------------------------------------------------------------------------

/// Parse a raw `page` parameter. Non-numeric, zero, or negative values fall
/// back to [`DEFAULT_PAGE`].
pub fn parse_page(raw: Option<&str>) -> i64 {
    parse_positive(raw).unwrap_or(DEFAULT_PAGE)
}

/// Parse a raw `perPage` parameter. Non-numeric, zero, or negative values
/// fall back to [`DEFAULT_PER_PAGE`]. No upper bound is applied.
pub fn parse_per_page(raw: Option<&str>) -> i64 {
    parse_positive(raw).unwrap_or(DEFAULT_PER_PAGE)
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// Resolve a categorical filter value. `None`, empty strings, and the
/// literal sentinel `"ALL"` all mean "no constraint".
pub fn categorical(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(v) if !v.is_empty() && v != FILTER_ALL => Some(v.to_string()),
        _ => None,
    }
}

/// Resolve a boolean filter value (e.g. the article `published` key).
/// `None`, empty, and `"ALL"` mean no constraint; otherwise the filter is
/// true exactly when the value is the literal `"true"`.
pub fn bool_filter(raw: Option<&str>) -> Option<bool> {
    categorical(raw).map(|v| v == "true")
}

/// Resolve a free-text search term. Empty and whitespace-only input means
/// no search predicate.
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort direction for list queries. Defaults to descending (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a raw `sortOrder` parameter. Anything other than `"asc"`
    /// (case-insensitive) is descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Resolve a raw `sortBy` parameter against an allow-list of
/// `(api_key, column)` pairs. Unrecognized or absent keys fall back to
/// `default_column`. Sort columns are interpolated into SQL, so they must
/// come from this table and never from raw user input.
pub fn resolve_sort<'a>(
    raw: Option<&str>,
    allowed: &[(&'a str, &'a str)],
    default_column: &'a str,
) -> &'a str {
    raw.and_then(|key| {
        allowed
            .iter()
            .find(|(api_key, _)| *api_key == key)
            .map(|(_, column)| *column)
    })
    .unwrap_or(default_column)
}

/// Compute the OFFSET for a page. `page` is assumed already validated (>= 1).
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

// ---------------------------------------------------------------------------
// Result page
// ---------------------------------------------------------------------------

/// One page of list results plus the pagination metadata the admin list
/// controls need to render page links.
#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> ListPage<T> {
    /// Assemble a page from a fetched slice and the matching total count.
    /// `total_pages` is `ceil(total / per_page)`, and 0 when `total` is 0.
    pub fn new(items: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
