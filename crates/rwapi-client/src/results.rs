//! Response envelope
//!
//! [`Results`] wraps the decoded response of one query, or nothing when the
//! query failed. Every accessor falls back to an empty or zero value when
//! the expected key is missing or has the wrong type, so callers only need
//! [`Results::error`] to tell a failed query from an empty one.
//!
//! Expected response shape:
//!
//! ```json
//! {
//!   "totalCount": 120,
//!   "count": 10,
//!   "data": [{"id": "1", "fields": {}}],
//!   "embedded": {"facets": {"country": {"data": []}}}
//! }
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Results {
    data: Option<Value>,
}

impl Results {
    pub fn new(data: Option<Value>) -> Self {
        Self { data }
    }

    /// True when the query produced no response
    pub fn error(&self) -> bool {
        self.data.is_none()
    }

    /// `totalCount`: items matching the query, 0 when missing
    pub fn total(&self) -> u64 {
        self.number("totalCount")
    }

    /// `count`: items in this response, 0 when missing
    pub fn count(&self) -> u64 {
        self.number("count")
    }

    /// `data`: returned items in response order, empty when missing
    pub fn items(&self) -> &[Value] {
        self.get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First returned item, an empty object when there is none
    pub fn item(&self) -> Value {
        self.items()
            .first()
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Items decoded as `T`; items that do not decode are skipped
    pub fn items_as<T: DeserializeOwned>(&self) -> Vec<T> {
        self.items()
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()
    }

    /// `embedded.facets` keyed by facet name, empty when missing
    pub fn facets(&self) -> Map<String, Value> {
        self.facet_map().cloned().unwrap_or_default()
    }

    /// One facet by name, an empty object when missing
    pub fn facet(&self, name: &str) -> Value {
        self.facet_map()
            .and_then(|facets| facets.get(name))
            .filter(|facet| !facet.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Decoded response, `None` if the query failed
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_raw(self) -> Option<Value> {
        self.data
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }

    fn number(&self, key: &str) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(0)
    }

    fn facet_map(&self) -> Option<&Map<String, Value>> {
        self.get("embedded")
            .and_then(|embedded| embedded.get("facets"))
            .and_then(Value::as_object)
    }
}

impl From<Value> for Results {
    fn from(data: Value) -> Self {
        Self::new(Some(data))
    }
}
