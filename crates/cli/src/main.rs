mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Apache Thrift IDL parser.
#[derive(Parser)]
#[command(name = "thrift-idl", version, about = "Apache Thrift IDL parser")]
struct Cli {
    /// Output format for errors and summaries (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log parser activity to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .thrift file and print the document as JSON
    Parse {
        /// Path to the .thrift source file
        file: PathBuf,
        /// Print single-line JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
        /// TOML file with parse options (escapes, max_depth)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Interpret backslash escapes inside string values
        #[arg(long)]
        decode_escapes: bool,
    },

    /// Parse a .thrift file and check the document against the JSON Schema
    Validate {
        /// Path to the .thrift source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            file,
            compact,
            config,
            decode_escapes,
        } => {
            let mut options = match config {
                Some(path) => commands::load_options(&path, cli.output, cli.quiet),
                None => thrift_idl::ParseOptions::default(),
            };
            if decode_escapes {
                options.escapes = thrift_idl::EscapeMode::Decode;
            }
            commands::parse::cmd_parse(&file, &options, compact, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            commands::validate::cmd_validate(&file, cli.output, cli.quiet);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

/// Print an error message in the requested format. Suppressed by `--quiet`.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}
