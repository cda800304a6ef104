use sea_orm::sea_query::ConditionalStatement;
use serde_json::json;
use siftcrate::{Params, SiftConfig, apply_filters};

mod common;
use common::{base_query, orders_spec, params, registry, render};

fn exclusive_config() -> SiftConfig {
    SiftConfig {
        include_equal_in_range_filter: false,
        ..SiftConfig::default()
    }
}

fn rendered(params_value: serde_json::Value, config: &SiftConfig) -> String {
    let registry = registry();
    let spec = orders_spec(&registry);
    let condition = apply_filters(&spec, &registry, &params(params_value), config);
    let mut query = base_query();
    query.cond_where(condition);
    render(&query)
}

#[test]
fn date_min_widens_to_start_of_day_inclusive() {
    let sql = rendered(
        json!({"range": {"created_at": {"min": "2024-01-01"}}}),
        &SiftConfig::default(),
    );
    assert!(
        sql.contains(r#""orders"."created_at" >= '2024-01-01 00:00:00'"#),
        "inclusive date min missing: {sql}"
    );
}

#[test]
fn date_min_is_strict_when_flag_off() {
    let sql = rendered(
        json!({"range": {"created_at": {"min": "2024-01-01"}}}),
        &exclusive_config(),
    );
    assert!(
        sql.contains(r#""orders"."created_at" > '2024-01-01 00:00:00'"#),
        "strict date min missing: {sql}"
    );
    assert!(!sql.contains(">="), "flag off must not render >=: {sql}");
}

#[test]
fn date_max_widens_to_end_of_day_even_when_strict() {
    // Day widening and operator strictness are orthogonal.
    let sql = rendered(
        json!({"range": {"created_at": {"max": "2024-06-30"}}}),
        &exclusive_config(),
    );
    assert!(
        sql.contains(r#""orders"."created_at" < '2024-06-30 23:59:59'"#),
        "end-of-day max missing: {sql}"
    );
}

#[test]
fn both_bounds_collapse_to_inclusive_between() {
    // BETWEEN ignores the inclusivity flag entirely.
    let sql = rendered(
        json!({"range": {"created_at": {"min": "2024-01-01", "max": "2024-01-31"}}}),
        &exclusive_config(),
    );
    assert!(
        sql.contains(
            r#""orders"."created_at" BETWEEN '2024-01-01 00:00:00' AND '2024-01-31 23:59:59'"#
        ),
        "between missing: {sql}"
    );
}

#[test]
fn numeric_bounds_pass_through_unquoted() {
    let sql = rendered(
        json!({"range": {"amount": {"min": "10", "max": "500"}}}),
        &SiftConfig::default(),
    );
    assert!(
        sql.contains(r#""orders"."amount" BETWEEN 10 AND 500"#),
        "numeric between missing: {sql}"
    );
}

#[test]
fn float_bound_keeps_fraction() {
    let sql = rendered(
        json!({"range": {"amount": {"min": "9.5"}}}),
        &SiftConfig::default(),
    );
    assert!(
        sql.contains(r#""orders"."amount" >= 9.5"#),
        "float min missing: {sql}"
    );
}

#[test]
fn malformed_date_is_treated_as_opaque_value() {
    let sql = rendered(
        json!({"range": {"created_at": {"min": "not-a-date"}}}),
        &SiftConfig::default(),
    );
    assert!(
        sql.contains(r#""orders"."created_at" >= 'not-a-date'"#),
        "opaque bound should pass through: {sql}"
    );
}

#[test]
fn relation_range_is_existence_scoped() {
    let registry = registry();
    let spec = siftcrate::EntitySpec::builder("orders")
        .filter_relation("recipient", ["created_at"])
        .build(&registry)
        .expect("relation resolves");
    let params = Params::from_pairs([("range[recipient.created_at][min]", "2024-01-01")]);
    let condition = apply_filters(&spec, &registry, &params, &SiftConfig::default());

    let mut query = base_query();
    query.cond_where(condition);
    let sql = render(&query);
    assert!(sql.contains("EXISTS"), "expected existence subquery: {sql}");
    assert!(
        sql.contains(r#""recipients"."created_at" >= '2024-01-01 00:00:00'"#),
        "range should apply inside the subquery against the relation table: {sql}"
    );
}

#[test]
fn range_key_name_comes_from_config() {
    let config = SiftConfig {
        range_key: "bounds".to_owned(),
        ..SiftConfig::default()
    };
    let sql = rendered(json!({"bounds": {"amount": {"min": "10"}}}), &config);
    assert!(sql.contains(r#""orders"."amount" >= 10"#), "renamed range key ignored: {sql}");

    // The default key no longer matches once renamed.
    let sql = rendered(json!({"range": {"amount": {"min": "10"}}}), &config);
    assert_eq!(sql, r#"SELECT * FROM "orders""#);
}
