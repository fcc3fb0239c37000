//! Entry Dispatcher - parse source text from a rule chosen at runtime.
//!
//! [`FrontEnd`] owns the name tables and the entry rule registry of one
//! grammar. Both are built once in [`FrontEnd::new`]; every parse call after
//! that is a fresh, independent pest run.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use pest::error::{Error as PestError, ErrorVariant};
use pest::{Position, RuleType};
use tracing::{debug, trace};

use crate::classify::classify_root;
use crate::errors::{Error, Result};
use crate::grammar::{rule_name, Grammar, GrammarTables};
use crate::names::NameTable;
use crate::serializer::{Document, SerializationConfig, Serializer};
use crate::tree::ParseNode;

/// Where the source text comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::File(path)
    }
}

/// A grammar front end with its entry rule registry.
pub struct FrontEnd<G: Grammar> {
    tables: GrammarTables<G::Rule>,
    entries: HashMap<String, G::Rule>,
    grammar: PhantomData<fn() -> G>,
}

impl<G: Grammar> FrontEnd<G> {
    pub fn new() -> Self {
        let tables = GrammarTables::build::<G>();
        let entries = G::RULES
            .iter()
            .map(|rule| (rule_name(rule), *rule))
            .collect();
        Self {
            tables,
            entries,
            grammar: PhantomData,
        }
    }

    pub fn rule_names(&self) -> &NameTable {
        &self.tables.rule_names
    }

    pub fn token_names(&self) -> &NameTable {
        &self.tables.token_names
    }

    /// Resolves `name` to a production, listing every valid name on failure.
    pub fn entry_rule(&self, name: &str) -> Result<G::Rule> {
        match self.entries.get(name) {
            Some(rule) => {
                debug!(entry_rule = name, "resolved entry rule");
                Ok(*rule)
            }
            None => Err(Error::UnknownEntryRule {
                requested: name.to_string(),
                available: self.rule_names().to_vec(),
            }),
        }
    }

    /// Parses `input` starting at `entry_rule` and classifies the result.
    pub fn parse(&self, input: &str, entry_rule: &str) -> Result<ParseNode> {
        let rule = self.entry_rule(entry_rule)?;
        let pairs = G::parse_entry(rule, input).map_err(Error::syntax)?;
        let consumed = pairs.clone().last().map_or(0, |pair| pair.as_span().end());
        let rest = input.get(consumed..).unwrap_or_default();
        if !G::is_skippable(rest) {
            return Err(Error::syntax(unconsumed_input::<G::Rule>(input, consumed, rest)));
        }
        let tree = classify_root(rule, pairs, &self.tables)?;
        trace!(
            entry_rule,
            terminals = tree.terminal_count(),
            "parsed input"
        );
        Ok(tree)
    }

    pub fn serializer(&self, config: SerializationConfig) -> Serializer<'_> {
        Serializer::new(self.rule_names(), self.token_names(), config)
    }

    /// Parses text or a UTF-8 file and serializes the tree.
    pub fn parse_to_document(
        &self,
        source: Source<'_>,
        entry_rule: &str,
        config: SerializationConfig,
    ) -> Result<Document> {
        match source {
            Source::Text(text) => self.parse_str_to_document(text, entry_rule, config),
            Source::File(path) => self.parse_file_to_document(path, entry_rule, config),
        }
    }

    pub fn parse_str_to_document(
        &self,
        text: &str,
        entry_rule: &str,
        config: SerializationConfig,
    ) -> Result<Document> {
        let tree = self.parse(text, entry_rule)?;
        Ok(self.serializer(config).serialize(&tree))
    }

    pub fn parse_file_to_document(
        &self,
        path: impl AsRef<Path>,
        entry_rule: &str,
        config: SerializationConfig,
    ) -> Result<Document> {
        let text = read_source(path.as_ref())?;
        self.parse_str_to_document(&text, entry_rule, config)
    }
}

impl<G: Grammar> Default for FrontEnd<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Grammar> fmt::Debug for FrontEnd<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrontEnd")
            .field("rule_names", self.rule_names())
            .field("token_names", self.token_names())
            .finish()
    }
}

/// Syntax error pointing at the first input an entry rule did not match.
fn unconsumed_input<R: RuleType>(input: &str, consumed: usize, rest: &str) -> PestError<R> {
    let offset = consumed + (rest.len() - rest.trim_start().len());
    let position = Position::new(input, offset).unwrap_or_else(|| Position::from_start(input));
    PestError::new_from_pos(
        ErrorVariant::CustomError {
            message: "expected end of input".to_string(),
        },
        position,
    )
}

/// Reads a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading source file");
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
