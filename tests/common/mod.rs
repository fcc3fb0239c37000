//! Shared test grammar: identifiers only.
//!
//! `start` matches a single identifier, `pair` two of them, and `words` any
//! number of them. `ID` is the only token.

#![allow(dead_code)]

use parsedoc::Grammar;
use pest::{error::Error as PestError, iterators::Pairs, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar_inline = r#"
WHITESPACE = _{ " " | "\t" | "\n" }
start = { SOI ~ ID ~ EOI }
pair  = { SOI ~ ID ~ ID ~ EOI }
words = { SOI ~ ID* ~ EOI }
ID    = @{ ASCII_ALPHA+ }
"#]
pub struct IdentParser;

impl Grammar for IdentParser {
    type Rule = Rule;
    const RULES: &'static [Rule] = &[Rule::start, Rule::pair, Rule::words];
    const TOKENS: &'static [Rule] = &[Rule::ID];
    const SKIPPED: &'static [Rule] = &[Rule::EOI];

    fn parse_entry(rule: Rule, input: &str) -> Result<Pairs<'_, Rule>, PestError<Rule>> {
        <Self as Parser<Rule>>::parse(rule, input)
    }
}
