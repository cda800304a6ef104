//! Relation descriptors and the correlated existence subquery they drive.

use std::collections::HashMap;

use sea_orm::sea_query::{Alias, Expr, ExprTrait, Query, SimpleExpr};

/// Join metadata for one declared one-hop relation.
///
/// `foreign_key` names a column on the owning entity's base table and
/// `owner_key` a column on the related table. The pair drives both the sort
/// join (`LEFT JOIN related ON base.foreign_key = related.owner_key`) and
/// the filter/search existence subqueries. Has-many relations register the
/// reverse pairing (`foreign_key = "id"`, `owner_key = "order_id"`); the
/// correlation itself is symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDef {
    table: String,
    foreign_key: String,
    owner_key: String,
}

impl RelationDef {
    pub fn new(
        table: impl Into<String>,
        foreign_key: impl Into<String>,
        owner_key: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            foreign_key: foreign_key.into(),
            owner_key: owner_key.into(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    #[must_use]
    pub fn owner_key(&self) -> &str {
        &self.owner_key
    }
}

/// Name → [`RelationDef`] mapping, populated once at startup and queried by
/// name during spec validation and request handling.
#[derive(Debug, Clone, Default)]
pub struct RelationRegistry {
    relations: HashMap<String, RelationDef>,
}

impl RelationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, relation: RelationDef) {
        self.relations.insert(name.into(), relation);
    }

    /// Chaining form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, relation: RelationDef) -> Self {
        self.register(name, relation);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RelationDef> {
        self.relations.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }
}

/// `EXISTS (SELECT 1 FROM related WHERE related.owner_key = base.foreign_key
/// AND <constraint>)`: requires at least one related row without
/// duplicating base rows the way a join would.
pub(crate) fn related_exists(
    base_table: &str,
    relation: &RelationDef,
    constraint: SimpleExpr,
) -> SimpleExpr {
    let mut subquery = Query::select();
    subquery
        .expr(Expr::cust("1"))
        .from(Alias::new(relation.table()))
        .and_where(
            Expr::col((Alias::new(relation.table()), Alias::new(relation.owner_key())))
                .equals((Alias::new(base_table), Alias::new(relation.foreign_key()))),
        )
        .and_where(constraint);
    Expr::exists(subquery)
}
