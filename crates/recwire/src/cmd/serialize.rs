use std::fs;
use std::io::{IsTerminal, Read};

use recwire_payload::{ImportConfig, OutboundPacket, OutboundPayload, Value};
use recwire_record::{RecordSerializer, Serializer};

use crate::cmd::SerializeArgs;
use crate::exit::{io_error, payload_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_record, OutputFormat};

pub fn run(args: SerializeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ImportConfig {
        revive_buffers: !args.no_revive_buffers,
    };
    let input = read_input(&args)?;
    let value = Value::from_json_slice_with_config(&input, &config)
        .map_err(|err| payload_error("invalid payload", err))?;

    let packet = build_packet(value, &args);
    tracing::debug!(
        response = packet.is_response(),
        envelope = packet.payload().is_envelope(),
        "classified payload"
    );

    let record = RecordSerializer::new().serialize(packet);
    print_record(&record, format);
    Ok(SUCCESS)
}

fn build_packet(value: Value, args: &SerializeArgs) -> OutboundPacket {
    if args.packet {
        return OutboundPacket::detect(value);
    }
    let payload = OutboundPayload::detect(value);
    if args.response {
        OutboundPacket::Response(payload)
    } else {
        OutboundPacket::Data(payload)
    }
}

fn read_input(args: &SerializeArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::new(
            USAGE,
            "no payload: pass --json, --file, or pipe JSON on stdin",
        ));
    }
    let mut input = Vec::new();
    stdin
        .read_to_end(&mut input)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SerializeArgs {
        SerializeArgs {
            json: None,
            file: None,
            response: false,
            packet: false,
            no_revive_buffers: false,
        }
    }

    #[test]
    fn build_packet_wraps_as_data_by_default() {
        let packet = build_packet(Value::from("x"), &args());
        assert_eq!(packet, OutboundPacket::data(OutboundPayload::raw("x")));
    }

    #[test]
    fn build_packet_wraps_as_response() {
        let args = SerializeArgs {
            response: true,
            ..args()
        };
        let packet = build_packet(Value::object([("value", "v")]), &args);
        assert!(packet.is_response());
        assert!(packet.payload().is_envelope());
    }

    #[test]
    fn build_packet_detects_whole_packets() {
        let args = SerializeArgs {
            packet: true,
            ..args()
        };
        let packet = build_packet(Value::object([("response", Value::from(1))]), &args);
        assert_eq!(packet, OutboundPacket::response(OutboundPayload::raw(1)));
    }

    #[test]
    fn read_input_prefers_inline_json() {
        let args = SerializeArgs {
            json: Some("{\"a\":1}".to_string()),
            ..args()
        };
        assert_eq!(read_input(&args).unwrap(), b"{\"a\":1}".to_vec());
    }

    #[test]
    fn read_input_missing_file_fails() {
        let args = SerializeArgs {
            file: Some("/nonexistent/recwire-payload.json".into()),
            ..args()
        };
        let err = read_input(&args).unwrap_err();
        assert!(err.message.contains("failed reading"));
    }
}
