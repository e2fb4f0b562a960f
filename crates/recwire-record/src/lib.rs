//! Normalizes outbound payloads into wire-ready broker records.
//!
//! Every record produced here has the shape a broker producer expects:
//! - `headers` — always present, possibly empty, never coerced
//! - `key` — present only when the envelope carried one
//! - `value` — text, raw bytes, or null; never a structured value
//!
//! Serialization is total. Every payload maps to some record.

pub mod coerce;
pub mod header_names;
pub mod record;
pub mod serializer;

pub use coerce::encode;
pub use record::{RecordData, SerializedRecord};
#[cfg(feature = "async")]
pub use serializer::AsyncSerializer;
pub use serializer::{RecordSerializer, Serializer};

pub use recwire_payload::{
    Envelope, HeaderValue, Headers, Instance, Object, OutboundPacket, OutboundPayload, Stringable,
    Value,
};
