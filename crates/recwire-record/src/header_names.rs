//! Well-known header names.
//!
//! Request/reply transports reserve the `kafka_` prefix for routing and
//! bookkeeping headers. The serializer never interprets them; they travel
//! through an envelope's headers like any other entry.

/// Prefix shared by every reserved header.
pub const PREFIX: &str = "kafka_";

/// Correlates a request with its reply.
pub const CORRELATION_ID: &str = "kafka_correlationId";

/// Topic the reply should be published to.
pub const REPLY_TOPIC: &str = "kafka_replyTopic";

/// Partition the reply should be published to.
pub const REPLY_PARTITION: &str = "kafka_replyPartition";

/// Marks a reply carrying an error.
pub const NEST_ERR: &str = "kafka_nest-err";

/// Marks the final reply of a stream.
pub const NEST_IS_DISPOSED: &str = "kafka_nest-is-disposed";

pub const MESSAGE_KEY: &str = "kafka_messageKey";
pub const TOPIC: &str = "kafka_topic";
pub const PARTITION_ID: &str = "kafka_partitionId";
pub const OFFSET: &str = "kafka_offset";
pub const TIMESTAMP: &str = "kafka_timestamp";
pub const TIMESTAMP_TYPE: &str = "kafka_timestampType";
pub const GROUP_ID: &str = "kafka_groupId";
pub const DELIVERY_ATTEMPT: &str = "kafka_deliveryAttempt";

/// Every well-known header with a short description.
pub const WELL_KNOWN: &[(&str, &str)] = &[
    (CORRELATION_ID, "correlates a request with its reply"),
    (REPLY_TOPIC, "topic the reply is published to"),
    (REPLY_PARTITION, "partition the reply is published to"),
    (NEST_ERR, "reply carries an error"),
    (NEST_IS_DISPOSED, "final reply of a stream"),
    (MESSAGE_KEY, "message key"),
    (TOPIC, "topic name"),
    (PARTITION_ID, "partition id"),
    (OFFSET, "record offset"),
    (TIMESTAMP, "record timestamp"),
    (TIMESTAMP_TYPE, "record timestamp type"),
    (GROUP_ID, "consumer group id"),
    (DELIVERY_ATTEMPT, "delivery attempt counter"),
];

/// Returns true if the header name is in the reserved `kafka_` namespace.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(PREFIX)
}

/// Returns the description of a well-known header.
pub fn describe(name: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_names_are_reserved() {
        for (name, _) in WELL_KNOWN {
            assert!(is_reserved(name), "{name} should be reserved");
        }
        assert!(!is_reserved("x-trace-id"));
    }

    #[test]
    fn describe_known_and_unknown() {
        assert_eq!(
            describe(CORRELATION_ID),
            Some("correlates a request with its reply")
        );
        assert_eq!(describe("kafka_unknown"), None);
    }
}
