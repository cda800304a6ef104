//! Filter orchestration: the conjunctive constraint group.

use sea_orm::Condition;
use sea_orm::sea_query::{Alias, Expr, Value};
use tracing::debug;
use uuid::Uuid;

use super::range;
use crate::config::SiftConfig;
use crate::params::ParamStore;
use crate::relations::{RelationRegistry, related_exists};
use crate::spec::{EntitySpec, SpecEntry};

/// Walk the entity's `filterable` spec and collect every applicable
/// constraint into one AND group.
///
/// Bare columns get an equality constraint when the request carries their
/// key, and independently any range constraint found under the range
/// parameter; both may apply to the same column and then hold
/// conjunctively. Relation columns get the same treatment, each constraint
/// wrapped in its own existence subquery so that related rows are evaluated
/// independently. Entries whose relation fails to resolve are skipped.
///
/// The returned group is self-contained: adding it to a query never
/// regroups constraints the caller installed.
pub fn apply_filters(
    spec: &EntitySpec,
    relations: &RelationRegistry,
    params: &impl ParamStore,
    config: &SiftConfig,
) -> Condition {
    let mut condition = Condition::all();
    for entry in spec.filterable() {
        match entry {
            SpecEntry::Column(column) => {
                if let Some(value) = params.input(column).and_then(equality_value) {
                    condition = condition.add(
                        Expr::col((Alias::new(spec.table()), Alias::new(column.as_str())))
                            .eq(value),
                    );
                }
                let bounds = range::extract(params, config, column);
                if let Some(comparison) = range::comparison(spec.table(), column, &bounds, config)
                {
                    condition = condition.add(comparison);
                }
            }
            SpecEntry::Relation { name, columns } => {
                let Some(relation) = relations.get(name) else {
                    debug!(relation = name.as_str(), "skipping filter entry for unresolved relation");
                    continue;
                };
                for column in columns {
                    let target = format!("{name}.{column}");
                    let bounds = range::extract(params, config, &target);
                    if let Some(comparison) =
                        range::comparison(relation.table(), column, &bounds, config)
                    {
                        condition =
                            condition.add(related_exists(spec.table(), relation, comparison));
                    }
                    if let Some(value) = params
                        .input_at(&[name.as_str(), column.as_str()])
                        .and_then(equality_value)
                    {
                        let equality =
                            Expr::col((Alias::new(relation.table()), Alias::new(column.as_str())))
                                .eq(value);
                        condition =
                            condition.add(related_exists(spec.table(), relation, equality));
                    }
                }
            }
        }
    }
    condition
}

/// Coerce a JSON parameter into an equality operand: UUID-shaped strings
/// become UUIDs, numbers keep their width, booleans pass through. Empty
/// strings and structured values are unusable and skipped.
fn equality_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            Uuid::parse_str(trimmed)
                .map_or_else(|_| Some(trimmed.into()), |uuid| Some(uuid.into()))
        }
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(Value::from)
            .or_else(|| number.as_f64().map(Value::from)),
        serde_json::Value::Bool(flag) => Some((*flag).into()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}
