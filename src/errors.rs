//! Spec construction errors.
//!
//! Request-time problems never raise: anything the engine cannot safely
//! apply (unknown sort key, unresolvable relation, malformed date bound) is
//! skipped and logged at `debug`. The only errors surfaced to callers are
//! author-time declarations that can never resolve, caught while building an
//! [`EntitySpec`](crate::spec::EntitySpec).

use std::fmt;

/// An entity allowlist declaration that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A searchable/filterable relation entry, or a dot-qualified sortable
    /// key, references a relation missing from the relation registry.
    UnknownRelation {
        /// Base table of the entity being declared.
        entity: String,
        /// The relation name that failed to resolve.
        relation: String,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRelation { entity, relation } => {
                write!(f, "entity '{entity}' declares unknown relation '{relation}'")
            }
        }
    }
}

impl std::error::Error for SpecError {}
