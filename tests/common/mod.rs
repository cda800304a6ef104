#![allow(dead_code)]

use sea_orm::sea_query::{Alias, Asterisk, Query, SelectStatement, SqliteQueryBuilder};
use siftcrate::{EntitySpec, Params, RelationDef, RelationRegistry};

/// Relation registry shared by the integration tests: orders belong to a
/// recipient and a provider.
pub fn registry() -> RelationRegistry {
    RelationRegistry::new()
        .with(
            "recipient",
            RelationDef::new("recipients", "recipient_id", "id"),
        )
        .with(
            "provider",
            RelationDef::new("providers", "provider_id", "id"),
        )
}

/// An orders entity with bare and relation-scoped entries across all three
/// allowlists.
pub fn orders_spec(registry: &RelationRegistry) -> EntitySpec {
    EntitySpec::builder("orders")
        .search_column("reference")
        .search_column("CONCAT_WS(' ', first_name, last_name)")
        .search_relation("recipient", ["first_name", "last_name"])
        .filter_column("status")
        .filter_column("amount")
        .filter_column("created_at")
        .filter_column("archived")
        .filter_relation("recipient", ["email", "city"])
        .sort_key("created_at")
        .sort_key("amount")
        .sort_key("estimated_provider_fee{sum}estimated_platform_fee")
        .sort_key("recipient.first_name")
        .build(registry)
        .expect("spec relations resolve")
}

pub fn base_query() -> SelectStatement {
    let mut query = Query::select();
    query.column(Asterisk).from(Alias::new("orders"));
    query
}

pub fn render(query: &SelectStatement) -> String {
    query.to_string(SqliteQueryBuilder)
}

pub fn params(value: serde_json::Value) -> Params {
    Params::from_value(value)
}
