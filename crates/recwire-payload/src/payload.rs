use tracing::trace;

use crate::config::ImportConfig;
use crate::error::Result;
use crate::headers::{HeaderValue, Headers};
use crate::value::Value;

const VALUE_FIELD: &str = "value";
const KEY_FIELD: &str = "key";
const HEADERS_FIELD: &str = "headers";
const DATA_FIELD: &str = "data";
const RESPONSE_FIELD: &str = "response";

/// A pre-shaped broker message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    /// Message key. `None` means the record carries no key.
    pub key: Option<Value>,
    pub value: Value,
    /// Message headers. `None` means no headers were supplied.
    pub headers: Option<Headers>,
}

impl Envelope {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            key: None,
            value: value.into(),
            headers: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<Value>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a single header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name, value);
        self
    }
}

/// What a caller wants sent: an envelope, or a raw value for the value slot.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPayload {
    Envelope(Envelope),
    Raw(Value),
}

impl OutboundPayload {
    pub fn raw(value: impl Into<Value>) -> Self {
        OutboundPayload::Raw(value.into())
    }

    /// Classify a dynamic value by its structure.
    ///
    /// A plain object with a `value` property (even `Null` or `Undefined`)
    /// is an envelope; `key` and `headers` are taken from it. Anything else
    /// is raw. A `key` explicitly set to `Undefined` counts as absent.
    pub fn detect(value: Value) -> Self {
        match value {
            Value::Object(mut object) if object.contains_key(VALUE_FIELD) => {
                let value = object.remove(VALUE_FIELD).unwrap_or_default();
                let key = object
                    .remove(KEY_FIELD)
                    .filter(|key| !matches!(key, Value::Undefined));
                let headers = object.remove(HEADERS_FIELD).map(Headers::from_dynamic);
                trace!(has_key = key.is_some(), "detected envelope payload");
                OutboundPayload::Envelope(Envelope {
                    key,
                    value,
                    headers,
                })
            }
            other => {
                trace!(kind = other.kind(), "detected raw payload");
                OutboundPayload::Raw(other)
            }
        }
    }

    pub fn is_envelope(&self) -> bool {
        matches!(self, OutboundPayload::Envelope(_))
    }
}

impl From<Envelope> for OutboundPayload {
    fn from(envelope: Envelope) -> Self {
        OutboundPayload::Envelope(envelope)
    }
}

/// A payload on its way out: an outgoing message, or a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPacket {
    Data(OutboundPayload),
    Response(OutboundPayload),
}

impl OutboundPacket {
    pub fn data(payload: impl Into<OutboundPayload>) -> Self {
        OutboundPacket::Data(payload.into())
    }

    pub fn response(payload: impl Into<OutboundPayload>) -> Self {
        OutboundPacket::Response(payload.into())
    }

    /// Classify a dynamic `{data}` / `{response}` packet.
    ///
    /// A `response` property wins and is unwrapped one level; otherwise the
    /// `data` property (`Undefined` when missing) is the payload. Either
    /// way the inner value then goes through [`OutboundPayload::detect`].
    pub fn detect(packet: Value) -> Self {
        let mut object = match packet {
            Value::Object(object) => object,
            other => {
                trace!(kind = other.kind(), "packet is not an object, no data");
                return OutboundPacket::Data(OutboundPayload::Raw(Value::Undefined));
            }
        };

        match object.remove(RESPONSE_FIELD) {
            Some(response) => OutboundPacket::Response(OutboundPayload::detect(response)),
            None => {
                let data = object.remove(DATA_FIELD).unwrap_or_default();
                OutboundPacket::Data(OutboundPayload::detect(data))
            }
        }
    }

    /// Parse and classify a JSON packet.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json_str_with_config(text, &ImportConfig::default())
    }

    /// Parse and classify a JSON packet with explicit import config.
    pub fn from_json_str_with_config(text: &str, config: &ImportConfig) -> Result<Self> {
        Value::from_json_str_with_config(text, config).map(Self::detect)
    }

    pub fn is_response(&self) -> bool {
        matches!(self, OutboundPacket::Response(_))
    }

    pub fn payload(&self) -> &OutboundPayload {
        match self {
            OutboundPacket::Data(payload) | OutboundPacket::Response(payload) => payload,
        }
    }

    pub fn into_payload(self) -> OutboundPayload {
        match self {
            OutboundPacket::Data(payload) | OutboundPacket::Response(payload) => payload,
        }
    }
}
