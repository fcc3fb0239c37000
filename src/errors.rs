//! parsedoc Error Handling
//!
//! A single error enum covers every failure the dispatcher and classifier can
//! report. Name-resolution misses during serialization are not errors:
//! those degrade to fallback names instead of failing.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error raised by the grammar front end, kept as the original object.
pub type BoxedSyntaxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for all parsedoc failure modes.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The caller asked for a production the grammar does not expose.
    #[error("unknown entry rule `{requested}`; choose one of: {}", .available.join(", "))]
    #[diagnostic(
        code(parsedoc::unknown_entry_rule),
        help("entry rules are the lowercase productions declared by the grammar")
    )]
    UnknownEntryRule {
        requested: String,
        available: Vec<String>,
    },

    /// Source file could not be read or is not valid UTF-8.
    #[error("failed to read `{}`: {source}", .path.display())]
    #[diagnostic(code(parsedoc::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front end produced a node that is neither a token nor a rule.
    #[error("parse node `{rule}` at {line}:{column} is neither a terminal nor a rule")]
    #[diagnostic(
        code(parsedoc::invalid_node_kind),
        help("list the production in the grammar binding's RULES, TOKENS or SKIPPED tables")
    )]
    InvalidNodeKind {
        rule: String,
        line: usize,
        column: usize,
    },

    /// Syntax error raised by the parser, propagated untouched.
    #[error("{0}")]
    #[diagnostic(code(parsedoc::syntax))]
    Syntax(#[source] BoxedSyntaxError),
}

impl Error {
    /// Wraps a front-end error without interpreting it.
    pub fn syntax<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Syntax(Box::new(error))
    }

    /// Valid entry rule names carried by an `UnknownEntryRule` failure.
    pub fn available_rules(&self) -> Option<&[String]> {
        match self {
            Error::UnknownEntryRule { available, .. } => Some(available),
            _ => None,
        }
    }
}
