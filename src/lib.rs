//! # siftcrate
//!
//! Allowlist-driven translation of untrusted HTTP query parameters into
//! Sea-ORM / sea-query filtering, searching, and sorting clauses, across a
//! primary entity and its declared one-hop relations.
//!
//! Callers declare, per entity, which columns are searchable, filterable,
//! and sortable, each optionally scoped to a named relation, and the
//! engine converts a request's parameters into query constraints. Nothing
//! outside the declared allowlists can reach the query, and anything the
//! engine cannot apply safely is skipped rather than raised.
//!
//! ```rust,ignore
//! use sea_orm::sea_query::{Alias, Asterisk, Query};
//! use siftcrate::{EntitySpec, Params, RelationDef, RelationRegistry, SiftConfig};
//!
//! let relations = RelationRegistry::new()
//!     .with("recipient", RelationDef::new("recipients", "recipient_id", "id"));
//!
//! let spec = EntitySpec::builder("orders")
//!     .search_column("reference")
//!     .search_relation("recipient", ["first_name", "last_name"])
//!     .filter_column("status")
//!     .filter_relation("recipient", ["email"])
//!     .sort_key("created_at")
//!     .sort_key("recipient.first_name")
//!     .build(&relations)?;
//!
//! let config = SiftConfig::default();
//! let params = Params::from_pairs(query_string_pairs);
//!
//! let mut query = Query::select();
//! query.column(Asterisk).from(Alias::new("orders"));
//! siftcrate::apply(&mut query, &spec, &relations, &params, &config);
//! ```
//!
//! Query execution, pagination, and the HTTP layer stay with the caller;
//! this crate only decides which constraints to add and how to shape them.

pub mod config;
pub mod errors;
pub mod filtering;
pub mod params;
pub mod relations;
pub mod spec;

pub use config::SiftConfig;
pub use errors::SpecError;
pub use filtering::{
    SortDirective, apply, apply_filters, apply_search, apply_sort, parse_sort,
};
pub use params::{ParamStore, Params};
pub use relations::{RelationDef, RelationRegistry};
pub use spec::{EntitySpec, EntitySpecBuilder, SpecEntry};
