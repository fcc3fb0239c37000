//! parsedoc command line interface.
//!
//! This module is the entry point for all CLI commands and wires them to the
//! dispatcher of the bundled Object Pascal grammar.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Report};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

use crate::dispatch::{FrontEnd, Source};
use crate::grammars::pascal::{PascalParser, DEFAULT_ENTRY_RULE};
use crate::names::NameTable;
use crate::render::{render, Format};
use crate::serializer::SerializationConfig;

// ============================================================================
// CLI ARGUMENTS
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "parsedoc",
    version,
    about = "Serialize Object Pascal parse trees into JSON or YAML documents."
)]
pub struct ParsedocArgs {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Parse a file or inline text and print its document.
    Parse {
        /// The path to the source file to parse.
        #[arg(required_unless_present = "expr", conflicts_with = "expr")]
        file: Option<PathBuf>,
        /// Inline source text to parse instead of a file.
        #[arg(short, long)]
        expr: Option<String>,
        /// Grammar rule to start parsing from.
        #[arg(short, long, default_value = DEFAULT_ENTRY_RULE)]
        rule: String,
        /// Attach token kind, line and column to terminals.
        #[arg(long)]
        tokens: bool,
        /// Render terminals as bare text.
        #[arg(long)]
        compact: bool,
        /// Output format: pretty, json or yaml.
        #[arg(short, long, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// List the entry rules and token names of the grammar.
    Rules,
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = ParsedocArgs::parse();
    init_logging(args.verbose);

    match execute(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            print_error(report);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: ArgsCommand) -> miette::Result<()> {
    let front_end = FrontEnd::<PascalParser>::new();

    match command {
        ArgsCommand::Parse {
            file,
            expr,
            rule,
            tokens,
            compact,
            format,
        } => {
            let config = SerializationConfig::new()
                .with_token_metadata(tokens)
                .with_compact(compact);
            let source = match (&expr, &file) {
                (Some(text), _) => Source::Text(text.as_str()),
                (None, Some(path)) => Source::File(path.as_path()),
                (None, None) => miette::bail!("a source file or --expr is required"),
            };
            let document = front_end.parse_to_document(source, &rule, config)?;
            let text = render(&document, format).into_diagnostic()?;
            println!("{}", text.trim_end());
        }

        ArgsCommand::Rules => {
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            print_names(&mut stdout, "Entry rules", front_end.rule_names()).into_diagnostic()?;
            writeln!(stdout).into_diagnostic()?;
            print_names(&mut stdout, "Tokens", front_end.token_names()).into_diagnostic()?;
        }
    }

    Ok(())
}

// ============================================================================
// OUTPUT FUNCTIONS
// ============================================================================

/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, falling back to `info`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_names(stdout: &mut StandardStream, title: &str, names: &NameTable) -> std::io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(stdout, "{title} ({}):", names.len())?;
    stdout.reset()?;
    for name in names.iter() {
        writeln!(stdout, "  {name}")?;
    }
    Ok(())
}

fn print_error(report: Report) {
    eprintln!("{report:?}");
}
