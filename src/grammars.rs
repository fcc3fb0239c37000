//! Grammars bundled with parsedoc.
//!
//! Each submodule derives a pest parser from a `.pest` file next to it and
//! binds it through [`crate::grammar::Grammar`].

pub mod pascal;

pub use pascal::PascalParser;
