//! JSON import and structural encoding.
//!
//! Encoding follows the output consumers already parse: `Undefined`
//! properties are omitted, `Undefined` array slots become `null`, byte
//! buffers render as `{"type":"Buffer","data":[..]}`, instances render
//! their fields, and numbers use the same canonical text as top-level
//! coercion.

use bytes::Bytes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Number;

use crate::config::ImportConfig;
use crate::error::Result;
use crate::value::{canonical_number, number_text, Object, Value};

const BUFFER_TYPE: &str = "Buffer";

impl Value {
    /// Import a JSON value with default [`ImportConfig`].
    pub fn from_json(json: serde_json::Value) -> Self {
        Self::from_json_with_config(json, &ImportConfig::default())
    }

    /// Import a JSON value.
    pub fn from_json_with_config(json: serde_json::Value, config: &ImportConfig) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(canonical_number(number)),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| Self::from_json_with_config(item, config))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                if config.revive_buffers {
                    if let Some(bytes) = revive_buffer(&map) {
                        return Value::Bytes(bytes);
                    }
                }
                Value::Object(
                    map.into_iter()
                        .map(|(key, value)| (key, Self::from_json_with_config(value, config)))
                        .collect(),
                )
            }
        }
    }

    /// Parse JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json_str_with_config(text, &ImportConfig::default())
    }

    /// Parse JSON text into a value with explicit config.
    pub fn from_json_str_with_config(text: &str, config: &ImportConfig) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_json_with_config(json, config))
    }

    /// Parse JSON bytes into a value with explicit config.
    pub fn from_json_slice_with_config(bytes: &[u8], config: &ImportConfig) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_json_with_config(json, config))
    }

    /// Compact JSON text of this value.
    pub fn to_json_string(&self) -> String {
        // The Serialize impl has no failure path and every map key is a string.
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

fn revive_buffer(map: &serde_json::Map<String, serde_json::Value>) -> Option<Bytes> {
    if map.len() != 2 || map.get("type")?.as_str()? != BUFFER_TYPE {
        return None;
    }
    map.get("data")?
        .as_array()?
        .iter()
        .map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
        .collect::<Option<Vec<u8>>>()
        .map(Bytes::from)
}

/// Serialize raw bytes in the `{"type":"Buffer","data":[..]}` form.
///
/// Usable with `#[serde(serialize_with = "serialize_buffer")]`.
pub fn serialize_buffer<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry("type", BUFFER_TYPE)?;
    map.serialize_entry("data", &ByteSeq(bytes))?;
    map.end()
}

/// Doubles are written through [`number_text`]; integers need no help.
fn serialize_number<S: Serializer>(
    number: &Number,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if !number.is_f64() {
        return number.serialize(serializer);
    }
    match RawValue::from_string(number_text(number)) {
        Ok(raw) => raw.serialize(serializer),
        Err(_) => number.serialize(serializer),
    }
}

struct ByteSeq<'a>(&'a [u8]);

impl Serialize for ByteSeq<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for byte in self.0 {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Number(number) => serialize_number(number, serializer),
            Value::String(text) => serializer.serialize_str(text),
            Value::Bytes(bytes) => serialize_buffer(bytes, serializer),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(object) => object.serialize(serializer),
            Value::Instance(instance) => instance.fields().serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self
            .iter()
            .filter(|(_, value)| !matches!(value, Value::Undefined))
            .count();
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.iter() {
            if !matches!(value, Value::Undefined) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
