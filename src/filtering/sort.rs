//! Sort directive decoding and application.

use sea_orm::sea_query::{
    Alias, Expr, ExprTrait, IntoColumnRef, Order, SelectStatement, SimpleExpr,
};
use tracing::debug;

use crate::config::SiftConfig;
use crate::params::ParamStore;
use crate::relations::{RelationDef, RelationRegistry};
use crate::spec::EntitySpec;

/// Separator token for composite summed-column sort keys
/// (`fee_a{sum}fee_b`).
pub const SUM_SEPARATOR: &str = "{sum}";

/// One decoded ordering request. At most one applies per request.
#[derive(Debug, Clone, PartialEq)]
pub enum SortDirective {
    /// Order by a column on the entity's base table.
    Column {
        table: String,
        column: String,
        order: Order,
    },
    /// Order by the sum of two or more base-table columns.
    Summed {
        table: String,
        columns: Vec<String>,
        order: Order,
    },
    /// Join a declared relation and order by one of its columns.
    Related {
        base_table: String,
        relation: RelationDef,
        column: String,
        order: Order,
    },
}

/// Decode the configured sort parameter into a directive.
///
/// A leading `-` selects descending and is stripped before the allowlist
/// check; the stripped key must equal a `sortable` entry literally or the
/// directive is dropped. A dot-qualified key becomes a relation sort when
/// its relation resolves; a key containing [`SUM_SEPARATOR`] becomes a
/// summed sort; anything else orders by a single base-table column. Summed
/// detection runs before the plain-column fallback.
pub fn parse_sort(
    spec: &EntitySpec,
    relations: &RelationRegistry,
    params: &impl ParamStore,
    config: &SiftConfig,
) -> Option<SortDirective> {
    let raw = params.input(&config.sort_key)?.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    let (key, order) = match raw.strip_prefix('-') {
        Some(stripped) => (stripped, Order::Desc),
        None => (raw, Order::Asc),
    };
    if !spec.is_sortable(key) {
        debug!(key, "dropping sort key missing from the sortable allowlist");
        return None;
    }
    if let Some((name, column)) = key.split_once('.') {
        if column.contains('.') {
            debug!(key, "dropping relation sort key with more than one dot");
            return None;
        }
        let Some(relation) = relations.get(name) else {
            debug!(relation = name, "dropping sort key for unresolved relation");
            return None;
        };
        return Some(SortDirective::Related {
            base_table: spec.table().to_owned(),
            relation: relation.clone(),
            column: column.to_owned(),
            order,
        });
    }
    let summed: Vec<&str> = key
        .split(SUM_SEPARATOR)
        .filter(|part| !part.is_empty())
        .collect();
    if summed.len() >= 2 {
        return Some(SortDirective::Summed {
            table: spec.table().to_owned(),
            columns: summed.into_iter().map(str::to_owned).collect(),
            order,
        });
    }
    Some(SortDirective::Column {
        table: spec.table().to_owned(),
        column: key.to_owned(),
        order,
    })
}

/// Append the directive's join and `ORDER BY` to the statement.
pub fn apply_sort(query: &mut SelectStatement, directive: &SortDirective) {
    match directive {
        SortDirective::Column {
            table,
            column,
            order,
        } => {
            query.order_by((Alias::new(table), Alias::new(column)), order.clone());
        }
        SortDirective::Summed {
            table,
            columns,
            order,
        } => {
            if let Some(sum) = summed_expr(table, columns) {
                query.order_by_expr(sum, order.clone());
            }
        }
        SortDirective::Related {
            base_table,
            relation,
            column,
            order,
        } => {
            query.left_join(
                Alias::new(relation.table()),
                Expr::col((Alias::new(base_table), Alias::new(relation.foreign_key())))
                    .equals((Alias::new(relation.table()), Alias::new(relation.owner_key()))),
            );
            query.order_by((Alias::new(relation.table()), Alias::new(column)), order.clone());
        }
    }
}

fn summed_expr(table: &str, columns: &[String]) -> Option<SimpleExpr> {
    let mut parts = columns.iter().map(|column| {
        SimpleExpr::Column((Alias::new(table), Alias::new(column.as_str())).into_column_ref())
    });
    let first = parts.next()?;
    let second = parts.next()?;
    let mut sum = first.add(second);
    for part in parts {
        sum = sum.add(part);
    }
    Some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use serde_json::json;

    fn fixtures() -> (EntitySpec, RelationRegistry, SiftConfig) {
        let relations = RelationRegistry::new().with(
            "recipient",
            RelationDef::new("recipients", "recipient_id", "id"),
        );
        let spec = EntitySpec::builder("orders")
            .sort_key("created_at")
            .sort_key("fee_a{sum}fee_b")
            .sort_key("recipient.first_name")
            .sort_key("missing.rel")
            .build_unchecked();
        (spec, relations, SiftConfig::default())
    }

    fn sort_params(key: &str) -> Params {
        Params::from_value(json!({ "sort": key }))
    }

    #[test]
    fn descending_prefix_is_stripped() {
        let (spec, relations, config) = fixtures();
        let directive = parse_sort(&spec, &relations, &sort_params("-created_at"), &config)
            .expect("allowlisted key");
        assert_eq!(
            directive,
            SortDirective::Column {
                table: "orders".to_owned(),
                column: "created_at".to_owned(),
                order: Order::Desc,
            }
        );
    }

    #[test]
    fn plain_key_defaults_to_ascending() {
        let (spec, relations, config) = fixtures();
        let directive = parse_sort(&spec, &relations, &sort_params("created_at"), &config)
            .expect("allowlisted key");
        assert!(matches!(directive, SortDirective::Column { order: Order::Asc, .. }));
    }

    #[test]
    fn unlisted_key_is_dropped() {
        let (spec, relations, config) = fixtures();
        assert!(parse_sort(&spec, &relations, &sort_params("updated_at"), &config).is_none());
        // Partial matches do not count.
        assert!(parse_sort(&spec, &relations, &sort_params("created"), &config).is_none());
    }

    #[test]
    fn summed_key_collects_all_columns() {
        let (spec, relations, config) = fixtures();
        let directive = parse_sort(&spec, &relations, &sort_params("-fee_a{sum}fee_b"), &config)
            .expect("allowlisted key");
        assert_eq!(
            directive,
            SortDirective::Summed {
                table: "orders".to_owned(),
                columns: vec!["fee_a".to_owned(), "fee_b".to_owned()],
                order: Order::Desc,
            }
        );
    }

    #[test]
    fn relation_key_resolves_metadata() {
        let (spec, relations, config) = fixtures();
        let directive =
            parse_sort(&spec, &relations, &sort_params("recipient.first_name"), &config)
                .expect("allowlisted key");
        match directive {
            SortDirective::Related { relation, column, order, .. } => {
                assert_eq!(relation.table(), "recipients");
                assert_eq!(column, "first_name");
                assert_eq!(order, Order::Asc);
            }
            other => panic!("expected relation sort, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_relation_key_is_dropped() {
        let (spec, relations, config) = fixtures();
        assert!(parse_sort(&spec, &relations, &sort_params("missing.rel"), &config).is_none());
    }

    #[test]
    fn absent_parameter_is_a_noop() {
        let (spec, relations, config) = fixtures();
        let params = Params::from_value(json!({}));
        assert!(parse_sort(&spec, &relations, &params, &config).is_none());
    }
}
