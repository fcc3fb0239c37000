//! Parse tree to document serializer.
//!
//! Walks a [`ParseNode`] tree depth-first and produces a [`Document`] that
//! mirrors it exactly. Terminals render as bare strings in compact mode and
//! as `{kind, text, token?}` objects otherwise; rules render as
//! `{kind, rule, text, children}`. The walk uses an explicit stack, so tree
//! depth is bounded by memory rather than by the call stack.

use std::mem;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

use crate::names::NameTable;
use crate::tree::{ParseNode, RuleNode, Token};

/// Rule name used when a rule kind cannot be resolved.
pub const UNKNOWN_RULE: &str = "unknown";

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Options evaluated once per serialization call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializationConfig {
    /// Attach kind, line and column to terminal objects.
    pub include_token_metadata: bool,
    /// Render terminals as bare text. Takes precedence over metadata.
    pub compact: bool,
}

impl SerializationConfig {
    pub const fn new() -> Self {
        Self {
            include_token_metadata: false,
            compact: false,
        }
    }

    pub const fn with_token_metadata(mut self, include: bool) -> Self {
        self.include_token_metadata = include;
        self
    }

    pub const fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// Token metadata attached to a terminal object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub kind: String,
    pub line: usize,
    pub column: usize,
}

/// Structured rendering of a parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// A terminal rendered in compact mode.
    Text(String),
    Terminal {
        text: String,
        token: Option<TokenInfo>,
    },
    Rule {
        rule: String,
        text: String,
        children: Vec<Document>,
    },
}

impl Document {
    /// The text carried by any document shape.
    pub fn text(&self) -> &str {
        match self {
            Document::Text(text)
            | Document::Terminal { text, .. }
            | Document::Rule { text, .. } => text,
        }
    }

    pub fn children(&self) -> &[Document] {
        match self {
            Document::Rule { children, .. } => children,
            _ => &[],
        }
    }

    /// Rule name for rule documents.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Document::Rule { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        let Document::Rule { children, .. } = self else {
            return;
        };
        let mut pending = mem::take(children);
        while let Some(mut document) = pending.pop() {
            if let Document::Rule { children, .. } = &mut document {
                pending.append(children);
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Text(text) => serializer.serialize_str(text),
            Document::Terminal { text, token } => {
                let len = if token.is_some() { 3 } else { 2 };
                let mut state = serializer.serialize_struct("Terminal", len)?;
                state.serialize_field("kind", "terminal")?;
                state.serialize_field("text", text)?;
                match token {
                    Some(token) => state.serialize_field("token", token)?,
                    None => state.skip_field("token")?,
                }
                state.end()
            }
            Document::Rule {
                rule,
                text,
                children,
            } => {
                let mut state = serializer.serialize_struct("Rule", 4)?;
                state.serialize_field("kind", "rule")?;
                state.serialize_field("rule", rule)?;
                state.serialize_field("text", text)?;
                state.serialize_field("children", children)?;
                state.end()
            }
        }
    }
}

// ============================================================================
// SERIALIZER
// ============================================================================

/// Serializes `node` using the grammar's name tables.
pub fn serialize(
    node: &ParseNode,
    rule_names: &NameTable,
    token_names: &NameTable,
    config: SerializationConfig,
) -> Document {
    Serializer::new(rule_names, token_names, config).serialize(node)
}

/// A reusable view over name tables and a config.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'a> {
    rule_names: &'a NameTable,
    token_names: &'a NameTable,
    config: SerializationConfig,
}

/// A rule whose children are still being visited.
struct Frame<'t> {
    rule: &'t RuleNode,
    next_child: usize,
    text: String,
    children: Vec<Document>,
}

impl<'t> Frame<'t> {
    fn new(rule: &'t RuleNode) -> Self {
        Self {
            rule,
            next_child: 0,
            text: String::new(),
            children: Vec::with_capacity(rule.children.len()),
        }
    }
}

impl<'a> Serializer<'a> {
    pub fn new(
        rule_names: &'a NameTable,
        token_names: &'a NameTable,
        config: SerializationConfig,
    ) -> Self {
        Self {
            rule_names,
            token_names,
            config,
        }
    }

    pub fn serialize(&self, node: &ParseNode) -> Document {
        let root = match node {
            ParseNode::Terminal(token) => return self.terminal(token),
            ParseNode::Rule(rule) => rule,
        };

        let mut parents: Vec<Frame<'_>> = Vec::new();
        let mut current = Frame::new(root);
        loop {
            if let Some(child) = current.rule.children.get(current.next_child) {
                current.next_child += 1;
                match child {
                    ParseNode::Terminal(token) => {
                        current.text.push_str(&token.text);
                        current.children.push(self.terminal(token));
                    }
                    ParseNode::Rule(inner) => {
                        parents.push(mem::replace(&mut current, Frame::new(inner)));
                    }
                }
                continue;
            }

            let done = Document::Rule {
                rule: self.rule_name(current.rule.kind),
                text: current.text,
                children: current.children,
            };
            match parents.pop() {
                Some(parent) => {
                    current = parent;
                    current.text.push_str(done.text());
                    current.children.push(done);
                }
                None => return done,
            }
        }
    }

    fn terminal(&self, token: &Token) -> Document {
        if self.config.compact {
            return Document::Text(token.text.clone());
        }
        let token_info = self.config.include_token_metadata.then(|| TokenInfo {
            kind: self.token_name(token.kind),
            line: token.line,
            column: token.column,
        });
        Document::Terminal {
            text: token.text.clone(),
            token: token_info,
        }
    }

    fn rule_name(&self, kind: Option<usize>) -> String {
        match kind.and_then(|index| self.rule_names.get(index)) {
            Some(name) => name.to_string(),
            None => {
                tracing::debug!(?kind, "rule kind has no name, falling back to unknown");
                UNKNOWN_RULE.to_string()
            }
        }
    }

    fn token_name(&self, kind: usize) -> String {
        match self.token_names.get(kind) {
            Some(name) => name.to_string(),
            None => {
                tracing::debug!(kind, "token kind has no name, using its number");
                kind.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn rules() -> NameTable {
        NameTable::new(["assignment", "expression", "empty"])
    }

    fn tokens() -> NameTable {
        NameTable::new(["IDENT", "ASSIGN", "NUMBER", "ADD_OP"])
    }

    // a := 1 + b
    fn assignment() -> ParseNode {
        ParseNode::rule(
            Some(0),
            vec![
                ParseNode::terminal("a", 0, 1, 0),
                ParseNode::terminal(":=", 1, 1, 2),
                ParseNode::rule(
                    Some(1),
                    vec![
                        ParseNode::terminal("1", 2, 1, 5),
                        ParseNode::terminal("+", 3, 1, 7),
                        ParseNode::terminal("b", 0, 2, 4),
                    ],
                ),
            ],
        )
    }

    fn to_json(node: &ParseNode, config: SerializationConfig) -> serde_json::Value {
        serde_json::to_value(serialize(node, &rules(), &tokens(), config)).unwrap()
    }

    fn terminals(doc: &Document, out: &mut Vec<String>) {
        match doc {
            Document::Rule { children, .. } => children.iter().for_each(|c| terminals(c, out)),
            other => out.push(other.text().to_string()),
        }
    }

    #[rstest]
    #[case::plain(false)]
    #[case::with_metadata(true)]
    fn compact_terminal_is_bare_text(#[case] include_token_metadata: bool) {
        let config = SerializationConfig::new()
            .with_compact(true)
            .with_token_metadata(include_token_metadata);
        let node = ParseNode::terminal("begin", 7, 3, 2);
        assert_eq!(to_json(&node, config), json!("begin"));
    }

    #[test]
    fn terminal_object_without_metadata() {
        let node = ParseNode::terminal("a", 0, 1, 0);
        assert_eq!(
            to_json(&node, SerializationConfig::default()),
            json!({"kind": "terminal", "text": "a"})
        );
    }

    #[test]
    fn terminal_metadata_keeps_line_and_column() {
        let config = SerializationConfig::new().with_token_metadata(true);
        let node = ParseNode::terminal("b", 0, 12, 31);
        assert_eq!(
            to_json(&node, config),
            json!({
                "kind": "terminal",
                "text": "b",
                "token": {"kind": "IDENT", "line": 12, "column": 31}
            })
        );
    }

    #[test]
    fn unresolved_token_kind_falls_back_to_decimal() {
        let config = SerializationConfig::new().with_token_metadata(true);
        let node = ParseNode::terminal("?", 42, 1, 0);
        assert_eq!(to_json(&node, config)["token"]["kind"], json!("42"));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::out_of_range(Some(99))]
    fn unresolved_rule_kind_is_unknown(#[case] kind: Option<usize>) {
        let node = ParseNode::rule(kind, vec![ParseNode::terminal("x", 0, 1, 0)]);
        let doc = serialize(&node, &rules(), &tokens(), SerializationConfig::default());
        assert_eq!(doc.rule_name(), Some(UNKNOWN_RULE));
        assert_eq!(doc.text(), "x");
    }

    #[test]
    fn empty_production_yields_empty_children() {
        let node = ParseNode::rule(Some(2), vec![]);
        assert_eq!(
            to_json(&node, SerializationConfig::default()),
            json!({"kind": "rule", "rule": "empty", "text": "", "children": []})
        );
    }

    #[test]
    fn nested_rules_in_compact_mode() {
        let config = SerializationConfig::new().with_compact(true);
        assert_eq!(
            to_json(&assignment(), config),
            json!({
                "kind": "rule",
                "rule": "assignment",
                "text": "a:=1+b",
                "children": [
                    "a",
                    ":=",
                    {"kind": "rule", "rule": "expression", "text": "1+b", "children": ["1", "+", "b"]}
                ]
            })
        );
    }

    #[rstest]
    fn structure_matches_tree(
        #[values(false, true)] compact: bool,
        #[values(false, true)] include_token_metadata: bool,
    ) {
        let config = SerializationConfig {
            include_token_metadata,
            compact,
        };
        let tree = assignment();
        let doc = serialize(&tree, &rules(), &tokens(), config);

        assert_eq!(doc.children().len(), tree.children().len());
        assert_eq!(doc.children()[2].children().len(), tree.children()[2].children().len());

        let mut texts = Vec::new();
        terminals(&doc, &mut texts);
        assert_eq!(texts.concat(), doc.text());
        assert_eq!(doc.text(), tree.text());
    }

    #[test]
    fn serialization_is_idempotent() {
        let config = SerializationConfig::new().with_token_metadata(true);
        let tree = assignment();
        let first = serialize(&tree, &rules(), &tokens(), config);
        let second = serialize(&tree, &rules(), &tokens(), config);
        assert_eq!(first, second);
    }

    #[test]
    fn json_key_order_is_fixed() {
        let config = SerializationConfig::new().with_token_metadata(true);
        let node = ParseNode::rule(Some(1), vec![ParseNode::terminal("1", 2, 1, 0)]);
        let doc = serialize(&node, &rules(), &tokens(), config);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"kind":"rule","rule":"expression","text":"1","children":[{"kind":"terminal","text":"1","token":{"kind":"NUMBER","line":1,"column":0}}]}"#
        );
    }

    #[test]
    fn deep_trees_do_not_overflow() {
        let mut node = ParseNode::terminal("x", 0, 1, 0);
        for _ in 0..100_000 {
            node = ParseNode::rule(Some(1), vec![node]);
        }
        let doc = serialize(&node, &rules(), &tokens(), SerializationConfig::default());
        assert_eq!(doc.text(), "x");
        assert_eq!(doc.rule_name(), Some("expression"));
        drop(doc);
        drop(node);
    }

    #[test]
    fn config_reads_camel_case_keys() {
        let config: SerializationConfig =
            serde_json::from_str(r#"{"includeTokenMetadata": true}"#).unwrap();
        assert_eq!(config, SerializationConfig::new().with_token_metadata(true));
    }
}
