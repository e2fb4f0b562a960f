use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod headers;
pub mod serialize;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serialize a JSON payload into a broker record.
    Serialize(SerializeArgs),
    /// List well-known header names.
    Headers(HeadersArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Serialize(args) => serialize::run(args, format),
        Command::Headers(args) => headers::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// Inline JSON payload. Without --json or --file, the payload is read from stdin.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON payload from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Serialize as an outgoing response instead of an outgoing message.
    #[arg(long, conflicts_with = "packet")]
    pub response: bool,
    /// Treat the input as a whole packet: {"data": ..} or {"response": ..}.
    #[arg(long)]
    pub packet: bool,
    /// Keep {"type":"Buffer","data":[..]} objects as plain objects.
    #[arg(long)]
    pub no_revive_buffers: bool,
}

#[derive(Args, Debug, Default)]
pub struct HeadersArgs {
    /// Only list header names containing this text.
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
