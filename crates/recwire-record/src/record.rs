use bytes::Bytes;
use recwire_payload::{serialize_buffer, Headers, Value};
use serde::Serialize;

/// A record key or value in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Null,
    Text(String),
    Bytes(Bytes),
}

impl RecordData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Bytes that go on the wire. `None` for null.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RecordData::Null => None,
            RecordData::Text(text) => Some(text.as_bytes()),
            RecordData::Bytes(bytes) => Some(bytes),
        }
    }

    /// Wire size in bytes; zero for null.
    pub fn len(&self) -> usize {
        self.as_bytes().map_or(0, <[u8]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<RecordData> for Value {
    fn from(data: RecordData) -> Self {
        match data {
            RecordData::Null => Value::Null,
            RecordData::Text(text) => Value::String(text),
            RecordData::Bytes(bytes) => Value::Bytes(bytes),
        }
    }
}

impl Serialize for RecordData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordData::Null => serializer.serialize_unit(),
            RecordData::Text(text) => serializer.serialize_str(text),
            RecordData::Bytes(bytes) => serialize_buffer(bytes, serializer),
        }
    }
}

/// The `{key?, value, headers}` triple handed to a broker producer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedRecord {
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<RecordData>,
    pub value: RecordData,
}

impl SerializedRecord {
    /// A keyless record with no headers.
    pub fn new(value: RecordData) -> Self {
        Self {
            headers: Headers::new(),
            key: None,
            value,
        }
    }
}
