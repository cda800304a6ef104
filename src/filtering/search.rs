//! Search orchestration: one OR group of case-insensitive substring matches.

use sea_orm::Condition;
use sea_orm::sea_query::{Expr, SimpleExpr};
use tracing::debug;

use crate::config::SiftConfig;
use crate::params::ParamStore;
use crate::relations::{RelationRegistry, related_exists};
use crate::spec::{EntitySpec, SpecEntry};

/// Build the search group, gated entirely on the configured search key.
///
/// Returns `None` when the key is absent or the term is empty, in which
/// case the query must be left untouched. Otherwise every searchable entry
/// contributes one `LOWER(..) LIKE` match (relation entries through an
/// existence subquery) and a row matches if any of them does.
pub fn apply_search(
    spec: &EntitySpec,
    relations: &RelationRegistry,
    params: &impl ParamStore,
    config: &SiftConfig,
) -> Option<Condition> {
    let term = params.input(&config.search_key)?.as_str()?.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }
    let pattern = format!("%{}%", escape_like(&term));
    let mut condition = Condition::any();
    for entry in spec.searchable() {
        match entry {
            SpecEntry::Column(target) => {
                condition = condition.add(match_expr(target, &pattern));
            }
            SpecEntry::Relation { name, columns } => {
                let Some(relation) = relations.get(name) else {
                    debug!(relation = name.as_str(), "skipping search entry for unresolved relation");
                    continue;
                };
                for column in columns {
                    condition = condition
                        .add(related_exists(spec.table(), relation, match_expr(column, &pattern)));
                }
            }
        }
    }
    Some(condition)
}

/// `LOWER(<target>) LIKE ?` with the pattern bound rather than interpolated.
///
/// The target comes from the author-declared allowlist and is trusted as
/// raw SQL; it may be an expression such as
/// `CONCAT_WS(' ', first_name, last_name)`. The term is the only
/// request-controlled part and travels as a bound value with its wildcards
/// escaped.
fn match_expr(target: &str, pattern: &str) -> SimpleExpr {
    Expr::cust_with_values(format!("LOWER({target}) LIKE ? ESCAPE '\\'"), [pattern])
}

/// Escape `\`, `%`, and `_` so the term only ever matches as a literal
/// substring.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
