//! Process-wide configuration: reserved parameter names and range semantics.

use serde::{Deserialize, Serialize};

/// Names of the reserved query parameters, plus the comparison semantics for
/// single-bounded ranges.
///
/// Built once at startup and shared read-only across requests. Every key a
/// request can use is taken from here; nothing is hard-coded in the
/// orchestrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Parameter carrying the free-text search term.
    pub search_key: String,
    /// Parameter carrying the sort key (`-` prefix selects descending).
    pub sort_key: String,
    /// Parameter grouping per-column `min`/`max` range bounds.
    pub range_key: String,
    /// When true, single-bounded range comparisons include the boundary
    /// (`>=` / `<=`); when false they are strict (`>` / `<`). Two-bounded
    /// ranges collapse into `BETWEEN`, which stays inclusive on both ends
    /// regardless of this flag.
    pub include_equal_in_range_filter: bool,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            search_key: "search".to_owned(),
            sort_key: "sort".to_owned(),
            range_key: "range".to_owned(),
            include_equal_in_range_filter: true,
        }
    }
}
