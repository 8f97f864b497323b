//! Translates untrusted list parameters (search term, sort column, sort
//! direction, page number) into bounded, parameterized query pieces.
//!
//! Column names cannot be bound as SQL parameters, so the sort column is the
//! one piece that gets interpolated into query text. The returned identifier
//! is always an element of a closed allow-list, never the caller's string.

/// Fixed page size for the employee list.
pub const PAGE_SIZE: i64 = 5;

/// Columns the employee list may be sorted by.
pub const EMPLOYEE_SORT_COLUMNS: &[&str] =
    &["full_name", "email", "job_title", "department", "salary"];
pub const EMPLOYEE_DEFAULT_SORT: &str = "full_name";

/// Columns the timesheet list may be sorted by. `full_name` resolves against
/// the joined employee row.
pub const TIMESHEET_SORT_COLUMNS: &[&str] = &["full_name", "start_time"];
pub const TIMESHEET_DEFAULT_SORT: &str = "start_time";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) sorts descending; everything else falls back to
    /// ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolves a requested sort column against an allow-list. The return value is
/// borrowed from `allowed` (or is `default`), so caller-controlled text never
/// reaches query syntax.
pub fn sort_column<'a>(
    requested: Option<&str>,
    allowed: &[&'a str],
    default: &'a str,
) -> &'a str {
    match requested {
        Some(raw) => allowed.iter().copied().find(|col| *col == raw).unwrap_or(default),
        None => default,
    }
}

/// Bind parameter for the name search. SQLite `LIKE` is case-insensitive for
/// ASCII, which matches the original behavior; an empty term matches all rows.
pub fn like_pattern(search: &str) -> String {
    format!("%{}%", search)
}

/// Clamps the requested page to >= 1 and returns its row offset.
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1) * PAGE_SIZE
}

pub fn page_count(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}
