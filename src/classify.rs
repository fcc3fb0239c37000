//! Tree Classifier - turns raw pest pairs into a [`ParseNode`] tree.
//!
//! Every pair is looked up in the grammar tables: token pairs become
//! terminals, rule pairs become rule nodes with their inner pairs as
//! children, skipped pairs vanish. A pair the binding never classified is a
//! contract violation and fails with [`Error::InvalidNodeKind`].

use pest::iterators::{Pair, Pairs};
use pest::RuleType;

use crate::errors::{Error, Result};
use crate::grammar::{rule_name, GrammarTables, NodeClass};
use crate::tree::ParseNode;

/// Classifies the single root pair produced by an entry rule.
pub fn classify_root<R: RuleType>(
    entry: R,
    mut pairs: Pairs<'_, R>,
    tables: &GrammarTables<R>,
) -> Result<ParseNode> {
    let root = match pairs.next() {
        Some(pair) => classify(pair, tables)?,
        None => None,
    };
    root.ok_or_else(|| Error::InvalidNodeKind {
        rule: rule_name(&entry),
        line: 1,
        column: 0,
    })
}

/// Classifies one pair and its descendants; `None` for skipped pairs.
pub fn classify<R: RuleType>(
    pair: Pair<'_, R>,
    tables: &GrammarTables<R>,
) -> Result<Option<ParseNode>> {
    let rule = pair.as_rule();
    let (line, column) = pair.line_col();
    let column = column.saturating_sub(1);

    match tables.class_of(rule) {
        Some(NodeClass::Skipped) => Ok(None),
        Some(NodeClass::Token(kind)) => Ok(Some(ParseNode::terminal(
            pair.as_str(),
            kind,
            line,
            column,
        ))),
        Some(NodeClass::Rule(kind)) => {
            let children = pair
                .into_inner()
                .map(|inner| classify(inner, tables))
                .filter_map(Result::transpose)
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(ParseNode::rule(Some(kind), children)))
        }
        None => Err(Error::InvalidNodeKind {
            rule: rule_name(&rule),
            line,
            column,
        }),
    }
}
