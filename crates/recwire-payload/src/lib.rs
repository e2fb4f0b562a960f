//! Dynamic outbound payload model for broker records.
//!
//! Application code hands the transport arbitrary values: strings, byte
//! buffers, numbers, plain objects, arrays, or instances of its own types.
//! This crate gives those values a single representation ([`Value`]) and
//! classifies them into the shapes a serializer understands:
//! - [`Envelope`] — a pre-shaped `{key?, value, headers?}` message
//! - raw values — anything else, destined for the value slot
//! - [`OutboundPacket::Response`] — a reply payload wrapped one level deep
//!
//! Typed call sites build these shapes directly. Fully dynamic call sites
//! (JSON from elsewhere) go through [`OutboundPacket::detect`] and
//! [`OutboundPayload::detect`].

pub mod config;
pub mod error;
pub mod headers;
pub mod json;
pub mod payload;
pub mod value;

pub use config::ImportConfig;
pub use error::{PayloadError, Result};
pub use headers::{HeaderValue, Headers};
pub use json::serialize_buffer;
pub use payload::{Envelope, OutboundPacket, OutboundPayload};
pub use value::{number_text, Instance, Object, Stringable, Value, DEFAULT_OBJECT_REPR};
