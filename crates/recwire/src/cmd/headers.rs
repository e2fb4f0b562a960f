use recwire_record::header_names::WELL_KNOWN;

use crate::cmd::HeadersArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_header_names, OutputFormat};

pub fn run(args: HeadersArgs, format: OutputFormat) -> CliResult<i32> {
    let names = select(args.filter.as_deref());
    print_header_names(&names, format);
    Ok(SUCCESS)
}

fn select(filter: Option<&str>) -> Vec<(&'static str, &'static str)> {
    WELL_KNOWN
        .iter()
        .copied()
        .filter(|(name, _)| filter.is_none_or(|needle| name.contains(needle)))
        .collect()
}
