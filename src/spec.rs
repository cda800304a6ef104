//! Per-entity allowlists of searchable, filterable, and sortable columns.

use crate::errors::SpecError;
use crate::relations::RelationRegistry;

/// One allowlist entry: a column on the entity's own table, or a set of
/// columns on a declared relation's table.
///
/// For search entries, a `Column` value is trusted literally and may be a
/// raw SQL expression such as `CONCAT_WS(' ', first_name, last_name)`. The
/// allowlist is author-declared at startup; it is never fed from request
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecEntry {
    Column(String),
    Relation { name: String, columns: Vec<String> },
}

/// Immutable per-entity declaration of which columns a request may search,
/// filter, and sort by. Built once at startup through [`EntitySpec::builder`].
#[derive(Debug, Clone, Default)]
pub struct EntitySpec {
    table: String,
    searchable: Vec<SpecEntry>,
    filterable: Vec<SpecEntry>,
    sortable: Vec<String>,
}

impl EntitySpec {
    pub fn builder(table: impl Into<String>) -> EntitySpecBuilder {
        EntitySpecBuilder {
            spec: Self {
                table: table.into(),
                ..Self::default()
            },
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn searchable(&self) -> &[SpecEntry] {
        &self.searchable
    }

    #[must_use]
    pub fn filterable(&self) -> &[SpecEntry] {
        &self.filterable
    }

    #[must_use]
    pub fn sortable(&self) -> &[String] {
        &self.sortable
    }

    /// Sort keys match by literal string equality only; there are no partial
    /// matches.
    #[must_use]
    pub fn is_sortable(&self, key: &str) -> bool {
        self.sortable.iter().any(|declared| declared == key)
    }
}

/// Builder for [`EntitySpec`]. Entry order is preserved; it is the order
/// constraints are emitted in.
#[derive(Debug, Default)]
pub struct EntitySpecBuilder {
    spec: EntitySpec,
}

impl EntitySpecBuilder {
    #[must_use]
    pub fn search_column(mut self, column: impl Into<String>) -> Self {
        self.spec.searchable.push(SpecEntry::Column(column.into()));
        self
    }

    #[must_use]
    pub fn search_relation<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.searchable.push(SpecEntry::Relation {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn filter_column(mut self, column: impl Into<String>) -> Self {
        self.spec.filterable.push(SpecEntry::Column(column.into()));
        self
    }

    #[must_use]
    pub fn filter_relation<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.filterable.push(SpecEntry::Relation {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Declare one sortable key: a bare column, a dot-qualified relation
    /// column (`recipient.first_name`), or a summed composite
    /// (`fee_a{sum}fee_b`).
    #[must_use]
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.spec.sortable.push(key.into());
        self
    }

    /// Validate every relation reference against the registry and return the
    /// finished spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownRelation`] when a relation entry or a
    /// dot-qualified sortable key names a relation the registry does not
    /// hold.
    pub fn build(self, relations: &RelationRegistry) -> Result<EntitySpec, SpecError> {
        for entry in self.spec.searchable.iter().chain(self.spec.filterable.iter()) {
            if let SpecEntry::Relation { name, .. } = entry {
                if !relations.contains(name) {
                    return Err(SpecError::UnknownRelation {
                        entity: self.spec.table.clone(),
                        relation: name.clone(),
                    });
                }
            }
        }
        for key in &self.spec.sortable {
            if let Some((name, _)) = key.split_once('.') {
                if !relations.contains(name) {
                    return Err(SpecError::UnknownRelation {
                        entity: self.spec.table.clone(),
                        relation: name.to_owned(),
                    });
                }
            }
        }
        Ok(self.spec)
    }

    /// Skip startup validation. Unresolvable relation references are then
    /// skipped silently per request instead of being rejected here.
    #[must_use]
    pub fn build_unchecked(self) -> EntitySpec {
        self.spec
    }
}
