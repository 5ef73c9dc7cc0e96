pub(crate) mod parse;
pub(crate) mod validate;

use std::path::Path;

use thrift_idl::{Document, ParseError, ParseOptions};

use crate::{fail, OutputFormat};

/// Read parse options from a TOML file. Missing keys take their defaults.
pub(crate) fn load_options(path: &Path, output: OutputFormat, quiet: bool) -> ParseOptions {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(
            &format!("error reading config '{}': {}", path.display(), e),
            output,
            quiet,
        ),
    };
    match toml::from_str(&text) {
        Ok(options) => options,
        Err(e) => fail(
            &format!("error parsing config '{}': {}", path.display(), e),
            output,
            quiet,
        ),
    }
}

/// Read and parse a .thrift file, exiting with status 1 on any failure.
pub(crate) fn parse_file(
    file: &Path,
    options: &ParseOptions,
    output: OutputFormat,
    quiet: bool,
) -> Document {
    let source = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => fail(
            &format!("error reading file '{}': {}", file.display(), e),
            output,
            quiet,
        ),
    };
    match thrift_idl::parse_with(&source, options) {
        Ok(document) => document,
        Err(e) => {
            report_parse_error(file, &e, output, quiet);
            std::process::exit(1);
        }
    }
}

fn report_parse_error(file: &Path, e: &ParseError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}: {}", file.display(), e);
                if let Some(detail) = &e.detail {
                    eprintln!("  furthest failure: {}", detail);
                }
                eprintln!("  near: {:?}", e.snippet);
            }
        }
    }
}
