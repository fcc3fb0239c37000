//! parsedoc - serialize grammar-driven parse trees into structured documents.
//!
//! A pest grammar is bound through [`Grammar`]; [`FrontEnd`] parses source
//! text from any entry rule named at runtime, the classifier turns pest pairs
//! into a [`ParseNode`] tree, and [`serialize`] renders that tree as a
//! [`Document`] ready for JSON or YAML output.

pub use crate::dispatch::{FrontEnd, Source};
pub use crate::errors::{Error, Result};
pub use crate::grammar::{Grammar, NodeClass};
pub use crate::names::NameTable;
pub use crate::serializer::{serialize, Document, SerializationConfig, TokenInfo};
pub use crate::tree::{ParseNode, RuleNode, Token};

pub mod classify;
pub mod cli;
pub mod dispatch;
pub mod errors;
pub mod grammar;
pub mod grammars;
pub mod names;
pub mod render;
pub mod serializer;
pub mod tree;
