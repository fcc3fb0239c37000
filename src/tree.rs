//! Parse tree model consumed by the serializer.
//!
//! A tree is built once per parse call by the classifier and only borrowed by
//! the serializer afterwards.

use std::mem;

use serde::{Deserialize, Serialize};

/// A lexical token emitted by the grammar front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Index into the grammar's token name table.
    pub kind: usize,
    /// 1-based line.
    pub line: usize,
    /// 0-based column, counted in characters.
    pub column: usize,
}

/// An interior node for one grammar production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleNode {
    /// Index into the grammar's rule name table, if the production is known.
    pub kind: Option<usize>,
    pub children: Vec<ParseNode>,
}

/// A node of a parse tree: a token leaf or a rule with ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseNode {
    Terminal(Token),
    Rule(RuleNode),
}

impl Token {
    pub fn new(text: impl Into<String>, kind: usize, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
            column,
        }
    }
}

impl RuleNode {
    pub fn new(kind: Option<usize>, children: Vec<ParseNode>) -> Self {
        Self { kind, children }
    }

    /// Concatenated text of every terminal below this node, left to right.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut pending: Vec<&ParseNode> = self.children.iter().rev().collect();
        while let Some(node) = pending.pop() {
            match node {
                ParseNode::Terminal(token) => text.push_str(&token.text),
                ParseNode::Rule(rule) => pending.extend(rule.children.iter().rev()),
            }
        }
        text
    }
}

// Children are dropped from a heap worklist so deep trees free without
// recursion.
impl Drop for RuleNode {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let ParseNode::Rule(mut rule) = node {
                pending.append(&mut rule.children);
            }
        }
    }
}

impl ParseNode {
    pub fn terminal(text: impl Into<String>, kind: usize, line: usize, column: usize) -> Self {
        ParseNode::Terminal(Token::new(text, kind, line, column))
    }

    pub fn rule(kind: Option<usize>, children: Vec<ParseNode>) -> Self {
        ParseNode::Rule(RuleNode::new(kind, children))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseNode::Terminal(_))
    }

    /// The token of a terminal node.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseNode::Terminal(token) => Some(token),
            ParseNode::Rule(_) => None,
        }
    }

    /// The rule kind of a rule node; `None` for terminals and unknown rules.
    pub fn rule_kind(&self) -> Option<usize> {
        match self {
            ParseNode::Terminal(_) => None,
            ParseNode::Rule(rule) => rule.kind,
        }
    }

    /// Ordered children; always empty for terminals.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Terminal(_) => &[],
            ParseNode::Rule(rule) => &rule.children,
        }
    }

    /// Full text spanned by this subtree, without skipped input.
    pub fn text(&self) -> String {
        match self {
            ParseNode::Terminal(token) => token.text.clone(),
            ParseNode::Rule(rule) => rule.text(),
        }
    }

    /// Number of terminals below (or at) this node.
    pub fn terminal_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                ParseNode::Terminal(_) => count += 1,
                ParseNode::Rule(rule) => pending.extend(&rule.children),
            }
        }
        count
    }
}
