use recwire_payload::{OutboundPacket, OutboundPayload, Value};
use tracing::debug;

use crate::coerce::encode;
use crate::record::SerializedRecord;

/// Turns outbound packets into broker records.
pub trait Serializer {
    fn serialize(&self, packet: OutboundPacket) -> SerializedRecord;
}

/// The default serializer. Stateless; copy it freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSerializer;

impl RecordSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a payload that is not wrapped in a packet.
    pub fn serialize_payload(&self, payload: OutboundPayload) -> SerializedRecord {
        match payload {
            OutboundPayload::Envelope(envelope) => SerializedRecord {
                headers: envelope.headers.unwrap_or_default(),
                key: envelope.key.map(encode),
                value: encode(envelope.value),
            },
            OutboundPayload::Raw(value) => SerializedRecord::new(encode(value)),
        }
    }

    /// Serialize a dynamic value, detecting whether it is an envelope.
    pub fn serialize_value(&self, value: Value) -> SerializedRecord {
        self.serialize_payload(OutboundPayload::detect(value))
    }
}

impl Serializer for RecordSerializer {
    fn serialize(&self, packet: OutboundPacket) -> SerializedRecord {
        let response = packet.is_response();
        let record = self.serialize_payload(packet.into_payload());
        debug!(
            response,
            keyed = record.key.is_some(),
            headers = record.headers.len(),
            value_len = record.value.len(),
            "serialized outbound record"
        );
        record
    }
}

/// Async calling convention for serializers.
///
/// Serialization never suspends; the returned future is immediately ready.
#[cfg(feature = "async")]
pub trait AsyncSerializer {
    fn serialize_async(
        &self,
        packet: OutboundPacket,
    ) -> impl std::future::Future<Output = SerializedRecord> + Send;
}

#[cfg(feature = "async")]
impl<T: Serializer + ?Sized> AsyncSerializer for T {
    fn serialize_async(
        &self,
        packet: OutboundPacket,
    ) -> impl std::future::Future<Output = SerializedRecord> + Send {
        std::future::ready(self.serialize(packet))
    }
}
