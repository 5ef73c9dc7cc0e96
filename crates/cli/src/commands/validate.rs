use std::path::Path;

use thrift_idl::{Document, ParseOptions, DOCUMENT_SCHEMA};

use crate::{fail, OutputFormat};

pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(DOCUMENT_SCHEMA) {
        Ok(s) => s,
        Err(e) => fail(
            &format!("internal error: failed to parse embedded document schema: {}", e),
            output,
            quiet,
        ),
    };
    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => fail(
            &format!("internal error: failed to compile schema: {}", e),
            output,
            quiet,
        ),
    };

    let document = super::parse_file(file, &ParseOptions::default(), output, quiet);
    let instance = document.to_json_value();
    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid: {}", summary(&document)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "valid": true, "counts": counts(&document) })
                ),
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid document");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({ "valid": false, "errors": errors });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        std::process::exit(1);
    }
}

fn counts(document: &Document) -> serde_json::Map<String, serde_json::Value> {
    [
        ("namespace", document.namespaces.len()),
        ("include", document.includes.len()),
        ("typedef", document.typedefs.len()),
        ("const", document.consts.len()),
        ("enum", document.enums.len()),
        ("struct", document.structs.len()),
        ("union", document.unions.len()),
        ("exception", document.exceptions.len()),
        ("service", document.services.len()),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .map(|(kind, n)| (kind.to_owned(), n.into()))
    .collect()
}

fn summary(document: &Document) -> String {
    let parts: Vec<String> = counts(document)
        .into_iter()
        .map(|(kind, n)| format!("{} {}", n, kind))
        .collect();
    if parts.is_empty() {
        "empty document".to_owned()
    } else {
        parts.join(", ")
    }
}
