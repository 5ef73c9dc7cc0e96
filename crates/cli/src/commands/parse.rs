use std::path::Path;

use thrift_idl::ParseOptions;

use crate::OutputFormat;

pub(crate) fn cmd_parse(
    file: &Path,
    options: &ParseOptions,
    compact: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let document = super::parse_file(file, options, output, quiet);
    let value = document.to_json_value();
    let rendered = if compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", rendered);
}
