use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use recwire_record::{HeaderValue, RecordData, SerializedRecord};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_record(record: &SerializedRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "KIND", "SIZE", "CONTENT"]);
            if let Some(key) = &record.key {
                table.add_row(data_row("key".to_string(), key));
            }
            table.add_row(data_row("value".to_string(), &record.value));
            for (name, value) in record.headers.iter() {
                let (size, content) = header_parts(value);
                table.add_row(vec![
                    format!("header {name}"),
                    value.kind().to_string(),
                    size.to_string(),
                    content,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let key = record
                .key
                .as_ref()
                .map_or_else(|| "-".to_string(), data_preview);
            println!(
                "key={} value={} ({} bytes) headers={}",
                key,
                data_preview(&record.value),
                record.value.len(),
                record.headers.len()
            );
            for (name, value) in record.headers.iter() {
                println!("  {name}={}", header_parts(value).1);
            }
        }
        OutputFormat::Raw => {
            if let Some(bytes) = record.value.as_bytes() {
                print_raw(bytes);
            }
        }
    }
}

#[derive(Serialize)]
struct HeaderNameOutput<'a> {
    name: &'a str,
    description: &'a str,
}

pub fn print_header_names(names: &[(&str, &str)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<HeaderNameOutput<'_>> = names
                .iter()
                .map(|&(name, description)| HeaderNameOutput { name, description })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["HEADER", "DESCRIPTION"]);
            for (name, description) in names {
                table.add_row(vec![name.to_string(), description.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (name, description) in names {
                println!("{name:<28} {description}");
            }
        }
        OutputFormat::Raw => {
            for (name, _) in names {
                println!("{name}");
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn data_row(field: String, data: &RecordData) -> Vec<String> {
    vec![
        field,
        data_kind(data).to_string(),
        data.len().to_string(),
        data_preview(data),
    ]
}

fn data_kind(data: &RecordData) -> &'static str {
    match data {
        RecordData::Null => "null",
        RecordData::Text(_) => "text",
        RecordData::Bytes(_) => "bytes",
    }
}

fn data_preview(data: &RecordData) -> String {
    match data {
        RecordData::Null => "null".to_string(),
        RecordData::Text(text) => text.clone(),
        RecordData::Bytes(bytes) => preview(bytes),
    }
}

/// Size and preview of a header. Lists and pass-through values are shown
/// as their JSON text.
fn header_parts(value: &HeaderValue) -> (usize, String) {
    match value {
        HeaderValue::Text(text) => (text.len(), text.clone()),
        HeaderValue::Bytes(bytes) => (bytes.len(), preview(bytes)),
        other => {
            let json = other.to_json_string();
            (json.len(), json)
        }
    }
}

fn preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
