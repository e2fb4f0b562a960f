//! Wire-ready broker records from dynamically-typed payloads.
//!
//! recwire turns whatever an application wants to publish (strings, byte
//! buffers, numbers, plain objects, arrays, instances of its own types, or
//! pre-shaped `{key, value, headers}` envelopes) into the exact record a
//! broker producer sends.
//!
//! # Crate Structure
//!
//! - [`payload`] — Dynamic value model and envelope detection
//! - [`record`] — Value coercion and the serializer producing broker records

/// Re-export payload types.
pub mod payload {
    pub use recwire_payload::*;
}

/// Re-export record types.
pub mod record {
    pub use recwire_record::*;
}
