//! Grammar binding - the contract between a pest front end and parsedoc.
//!
//! A binding lists which productions are parser rules (rule kinds), which are
//! tokens (token kinds) and which are dropped from the tree entirely. Kinds are
//! positions in those lists, and names come from the pest `Rule` enum itself.

use std::collections::HashMap;

use pest::{error::Error as PestError, iterators::Pairs, RuleType};

use crate::names::NameTable;

/// A pest grammar exposed to the dispatcher and classifier.
pub trait Grammar {
    type Rule: RuleType + Send + Sync + 'static;

    /// Parser productions in declaration order. Each one is an entry point.
    const RULES: &'static [Self::Rule];

    /// Token productions in declaration order.
    const TOKENS: &'static [Self::Rule];

    /// Productions that never appear in the tree, such as `EOI`.
    const SKIPPED: &'static [Self::Rule];

    /// Runs one parse starting at `rule`.
    fn parse_entry(
        rule: Self::Rule,
        input: &str,
    ) -> Result<Pairs<'_, Self::Rule>, PestError<Self::Rule>>;

    /// Whether `rest`, the input an entry rule left unmatched, holds only text
    /// the grammar skips. Plain whitespace unless the grammar says otherwise.
    fn is_skippable(rest: &str) -> bool {
        rest.trim().is_empty()
    }
}

/// How a pest pair maps onto a parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Token(usize),
    Rule(usize),
    Skipped,
}

/// Name tables and classification derived once from a [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarTables<R: RuleType> {
    pub rule_names: NameTable,
    pub token_names: NameTable,
    classes: HashMap<R, NodeClass>,
}

impl<R: RuleType> GrammarTables<R> {
    pub fn build<G: Grammar<Rule = R>>() -> Self {
        let mut classes = HashMap::new();
        for rule in G::SKIPPED {
            classes.insert(*rule, NodeClass::Skipped);
        }
        for (kind, rule) in G::TOKENS.iter().enumerate() {
            classes.insert(*rule, NodeClass::Token(kind));
        }
        for (kind, rule) in G::RULES.iter().enumerate() {
            classes.insert(*rule, NodeClass::Rule(kind));
        }

        Self {
            rule_names: G::RULES.iter().map(rule_name).collect(),
            token_names: G::TOKENS.iter().map(rule_name).collect(),
            classes,
        }
    }

    /// Classification of `rule`; `None` when the binding never listed it.
    pub fn class_of(&self, rule: R) -> Option<NodeClass> {
        self.classes.get(&rule).copied()
    }
}

/// Declared name of a pest rule, as written in the grammar file.
pub fn rule_name<R: RuleType>(rule: &R) -> String {
    format!("{rule:?}")
}
