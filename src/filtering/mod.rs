//! # Query Parameter → Clause Translation
//!
//! This module turns one request's parameters into filtering, searching,
//! and sorting clauses on a caller-supplied `SelectStatement`, constrained
//! to the columns each entity declared in its [`EntitySpec`].
//!
//! ## Parameter shapes
//!
//! ```rust,ignore
//! // Equality filter on a declared bare column
//! GET /orders?status=shipped
//!
//! // Equality filter on a declared relation column (existence subquery)
//! GET /orders?recipient[city]=Zurich
//!
//! // Range filters; dates widen to day boundaries
//! GET /orders?range[amount][min]=10&range[amount][max]=500
//! GET /orders?range[created_at][min]=2024-01-01
//! GET /orders?range[recipient.created_at][max]=2024-06-30
//!
//! // Free-text search across every searchable entry, OR-combined
//! GET /orders?search=john doe
//!
//! // Sorting: leading '-' for descending, dot for relation columns,
//! // '{sum}' for composite keys
//! GET /orders?sort=-created_at
//! GET /orders?sort=recipient.first_name
//! GET /orders?sort=estimated_provider_fee{sum}estimated_platform_fee
//! ```
//!
//! ## Composition rules
//!
//! - Filter constraints are AND-combined in one self-contained group.
//! - Search matches are OR-combined in their own group; the groups are then
//!   conjoined, so searching never loosens filtering.
//! - Range and equality constraints on the same column coexist
//!   conjunctively.
//! - At most one sort directive applies per request.
//!
//! Anything that cannot be applied safely (a key outside the allowlist, a
//! relation without registered metadata, a malformed bound) is skipped
//! silently. The engine never rejects a request.

pub mod conditions;
pub mod range;
pub mod search;
pub mod sort;

pub use conditions::apply_filters;
pub use range::RangeParam;
pub use search::apply_search;
pub use sort::{SUM_SEPARATOR, SortDirective, apply_sort, parse_sort};

use sea_orm::sea_query::{ConditionalStatement, SelectStatement};

use crate::config::SiftConfig;
use crate::params::ParamStore;
use crate::relations::RelationRegistry;
use crate::spec::EntitySpec;

/// Append all of one request's constraints to a query in one pass: the
/// filter group, the search group, then the sort directive. Each group is
/// grouped on its own, so constraints the caller already installed keep
/// their meaning.
pub fn apply(
    query: &mut SelectStatement,
    spec: &EntitySpec,
    relations: &RelationRegistry,
    params: &impl ParamStore,
    config: &SiftConfig,
) {
    query.cond_where(apply_filters(spec, relations, params, config));
    if let Some(search) = apply_search(spec, relations, params, config) {
        query.cond_where(search);
    }
    if let Some(directive) = parse_sort(spec, relations, params, config) {
        apply_sort(query, &directive);
    }
}
