use recwire_payload::{number_text, Value};
use tracing::trace;

use crate::record::RecordData;

/// Coerce a value into wire form. First matching rule wins:
///
/// 1. `Undefined` / `Null` become null.
/// 2. Strings pass through.
/// 3. Byte buffers pass through without copying.
/// 4. Numbers and booleans become their canonical text.
/// 5. Arrays and plain objects become compact JSON.
/// 6. Instances with a custom stringification use it.
/// 7. Any other instance becomes `[object Object]`.
///
/// Text and bytes are fixed points, so encoding an encoded value is a no-op.
pub fn encode(value: Value) -> RecordData {
    match value {
        Value::Undefined | Value::Null => RecordData::Null,
        Value::String(text) => RecordData::Text(text),
        Value::Bytes(bytes) => RecordData::Bytes(bytes),
        Value::Bool(flag) => RecordData::Text(flag.to_string()),
        Value::Number(number) => RecordData::Text(number_text(&number)),
        container @ (Value::Array(_) | Value::Object(_)) => {
            RecordData::Text(container.to_json_string())
        }
        Value::Instance(instance) => {
            if !instance.has_repr() {
                trace!(
                    type_name = instance.type_name(),
                    "instance has no custom stringification"
                );
            }
            RecordData::Text(instance.to_display_string())
        }
    }
}
