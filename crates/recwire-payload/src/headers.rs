use bytes::Bytes;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::json::serialize_buffer;
use crate::value::Value;

/// A header value as the broker carries it.
///
/// Text and bytes are the usual wire forms. Lists keep their items in
/// order, and anything else is carried untouched for the transport to
/// deal with.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Text(String),
    Bytes(Bytes),
    List(Vec<HeaderValue>),
    Other(Value),
}

impl HeaderValue {
    /// Short name of the variant, for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            HeaderValue::Text(_) => "text",
            HeaderValue::Bytes(_) => "bytes",
            HeaderValue::List(_) => "list",
            HeaderValue::Other(value) => value.kind(),
        }
    }

    /// Compact JSON text of this header value.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

impl From<&str> for HeaderValue {
    fn from(text: &str) -> Self {
        HeaderValue::Text(text.to_owned())
    }
}

impl From<String> for HeaderValue {
    fn from(text: String) -> Self {
        HeaderValue::Text(text)
    }
}

impl From<Bytes> for HeaderValue {
    fn from(bytes: Bytes) -> Self {
        HeaderValue::Bytes(bytes)
    }
}

impl From<Value> for HeaderValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => HeaderValue::Text(text),
            Value::Bytes(bytes) => HeaderValue::Bytes(bytes),
            Value::Array(items) => HeaderValue::List(items.into_iter().map(Into::into).collect()),
            other => HeaderValue::Other(other),
        }
    }
}

impl Serialize for HeaderValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HeaderValue::Text(text) => serializer.serialize_str(text),
            HeaderValue::Bytes(bytes) => serialize_buffer(bytes, serializer),
            HeaderValue::List(items) => serializer.collect_seq(items),
            HeaderValue::Other(value) => value.serialize(serializer),
        }
    }
}

/// Ordered header map, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: Vec<(String, HeaderValue)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing (in place) any header with the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<HeaderValue>,
    ) -> Option<HeaderValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Take headers from a dynamic `headers` property.
    ///
    /// Nil or non-object input yields an empty map. Every defined entry is
    /// passed through without coercion; `Undefined` entries are skipped.
    pub fn from_dynamic(value: Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            nil if nil.is_nil() => return Headers::new(),
            other => {
                warn!(
                    kind = other.kind(),
                    "ignoring headers that are not an object"
                );
                return Headers::new();
            }
        };

        object
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Undefined => {
                    debug!(header = %name, "skipping undefined header");
                    None
                }
                value => Some((name, HeaderValue::from(value))),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<HeaderValue>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dynamic_copies_text_and_bytes() {
        let value = Value::object([
            ("kafka_correlationId", Value::from("1234")),
            ("trace", Value::bytes(&b"\x01\x02"[..])),
        ]);
        let headers = Headers::from_dynamic(value);

        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.get("kafka_correlationId"),
            Some(&HeaderValue::Text("1234".to_string()))
        );
        assert_eq!(
            headers.get("trace"),
            Some(&HeaderValue::Bytes(Bytes::from_static(b"\x01\x02")))
        );
    }

    #[test]
    fn from_dynamic_nil_or_non_object_is_empty() {
        assert!(Headers::from_dynamic(Value::Undefined).is_empty());
        assert!(Headers::from_dynamic(Value::Null).is_empty());
        assert!(Headers::from_dynamic(Value::from("x")).is_empty());
        assert!(Headers::from_dynamic(Value::array([1])).is_empty());
    }

    #[test]
    fn from_dynamic_passes_other_entries_through() {
        let value = Value::object([
            ("a", Value::array(["x", "y"])),
            ("n", Value::from(1)),
            ("gone", Value::Undefined),
        ]);
        let headers = Headers::from_dynamic(value);

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "n"]);
        assert_eq!(
            headers.get("a"),
            Some(&HeaderValue::List(vec!["x".into(), "y".into()]))
        );
        assert_eq!(headers.get("n"), Some(&HeaderValue::Other(Value::from(1))));
        assert_eq!(
            serde_json::to_string(&headers).unwrap(),
            r#"{"a":["x","y"],"n":1}"#
        );
    }

    #[test]
    fn list_items_keep_their_own_forms() {
        let value = HeaderValue::from(Value::array([
            Value::from("t"),
            Value::bytes(&b"\x01"[..]),
            Value::from(true),
        ]));
        assert_eq!(value.kind(), "list");
        assert_eq!(
            value.to_json_string(),
            r#"["t",{"type":"Buffer","data":[1]},true]"#
        );
    }

    #[test]
    fn serializes_in_insertion_order() {
        let headers: Headers = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&headers).unwrap(),
            r#"{"b":"2","a":"1"}"#
        );
    }
}
