//! Request parameter store.
//!
//! The engine reads parameters through the [`ParamStore`] contract rather
//! than any HTTP type. [`Params`] is the bundled implementation: a nested
//! JSON map, built either from an already-nested value (the shape a JSON
//! filter body arrives in) or from flat `key=value` pairs using bracket
//! notation (`recipient[first_name]=Ada`, `range[amount][min]=5`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{PartialSchema, ToSchema};

/// Read-only lookup contract for one request's parameters.
pub trait ParamStore {
    /// Look up a value by dot-separated path (`recipient.email`).
    fn input(&self, path: &str) -> Option<&Value>;

    /// Look up a value by explicit path segments. Needed when a single
    /// segment contains a literal dot, as range targets do
    /// (`range[recipient.first_name][min]`).
    fn input_at(&self, segments: &[&str]) -> Option<&Value>;

    /// Whether a non-null value exists at the dot-separated path.
    fn has(&self, path: &str) -> bool {
        self.input(path).is_some_and(|value| !value.is_null())
    }
}

/// Nested parameter map keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap an already-nested JSON object. Non-object values yield an empty
    /// store.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Build a store from flat `key=value` pairs, expanding bracket notation
    /// into nesting. Later pairs overwrite earlier ones at the same path.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert_pair(key.as_ref(), value.into());
        }
        params
    }

    /// Insert one flat pair, expanding `a[b][c]` into nested maps.
    pub fn insert_pair(&mut self, key: &str, value: String) {
        let segments = key_segments(key);
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut node = &mut self.0;
        for segment in parents {
            let entry = node
                .entry((*segment).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            match entry {
                Value::Object(map) => node = map,
                _ => return,
            }
        }
        node.insert((*last).to_owned(), Value::String(value));
    }

    /// Insert a value at a top-level key, replacing any existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl ParamStore for Params {
    fn input(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        self.input_at(&segments)
    }

    fn input_at(&self, segments: &[&str]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        let mut current = self.0.get(*first)?;
        for segment in rest {
            current = current.as_object()?.get(*segment)?;
        }
        Some(current)
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`. Keys without brackets are a
/// single segment. An unterminated bracket keeps the remainder as one
/// segment rather than failing.
fn key_segments(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    let mut segments = vec![&key[..open]];
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(end) = stripped.find(']') else {
            segments.push(stripped);
            return segments;
        };
        segments.push(&stripped[..end]);
        rest = &stripped[end + 1..];
    }
    segments
}

// Schema support without constraining the map shape: the parameter surface
// is open-ended by design (any allowlisted column name is a valid key).
impl ToSchema for Params {
    fn name() -> std::borrow::Cow<'static, str> {
        "Params".into()
    }
}

impl PartialSchema for Params {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        use utoipa::openapi::schema::{ObjectBuilder, Schema};

        utoipa::openapi::RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .description(Some(
                    "Free-form query parameter map; recognised keys are the \
                     entity's declared columns plus the configured search, \
                     sort, and range parameters",
                ))
                .into(),
        ))
    }
}
