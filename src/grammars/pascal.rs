//! Object Pascal subset grammar.
//!
//! See `pascal.pest` for the productions. Tokens are the uppercase rules,
//! parser rules the lowercase ones; their order below fixes the token and rule
//! kinds reported in documents.

use pest::{error::Error as PestError, iterators::Pairs, Parser};
use pest_derive::Parser;

use crate::grammar::Grammar;

/// Entry rule parsing a whole program.
pub const DEFAULT_ENTRY_RULE: &str = "program";

#[derive(Parser)]
#[grammar = "grammars/pascal.pest"]
pub struct PascalParser;

impl Grammar for PascalParser {
    type Rule = Rule;

    const RULES: &'static [Rule] = &[
        Rule::program,
        Rule::program_header,
        Rule::uses_clause,
        Rule::ident_list,
        Rule::block,
        Rule::declaration,
        Rule::const_section,
        Rule::const_decl,
        Rule::var_section,
        Rule::var_decl,
        Rule::type_ref,
        Rule::routine,
        Rule::formal_params,
        Rule::param_group,
        Rule::compound_statement,
        Rule::statement_list,
        Rule::statement,
        Rule::if_statement,
        Rule::while_statement,
        Rule::assignment,
        Rule::call,
        Rule::actual_params,
        Rule::designator,
        Rule::expression,
        Rule::simple_expression,
        Rule::term,
        Rule::factor,
    ];

    const TOKENS: &'static [Rule] = &[
        Rule::IDENT,
        Rule::NUMBER,
        Rule::STRING,
        Rule::PROGRAM,
        Rule::USES,
        Rule::CONST,
        Rule::VAR,
        Rule::PROCEDURE,
        Rule::FUNCTION,
        Rule::BEGIN,
        Rule::END,
        Rule::IF,
        Rule::THEN,
        Rule::ELSE,
        Rule::WHILE,
        Rule::DO,
        Rule::NOT,
        Rule::ASSIGN,
        Rule::COLON,
        Rule::SEMI,
        Rule::COMMA,
        Rule::DOT,
        Rule::LPAREN,
        Rule::RPAREN,
        Rule::EQ,
        Rule::REL_OP,
        Rule::SIGN,
        Rule::ADD_OP,
        Rule::MUL_OP,
    ];

    const SKIPPED: &'static [Rule] = &[Rule::EOI];

    fn parse_entry(rule: Rule, input: &str) -> Result<Pairs<'_, Rule>, PestError<Rule>> {
        <Self as Parser<Rule>>::parse(rule, input)
    }

    fn is_skippable(rest: &str) -> bool {
        <Self as Parser<Rule>>::parse(Rule::trailing, rest).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarTables, NodeClass};

    #[test]
    fn every_rule_is_classified_once() {
        let tables = GrammarTables::build::<PascalParser>();
        assert_eq!(tables.rule_names.len(), PascalParser::RULES.len());
        assert_eq!(tables.token_names.len(), PascalParser::TOKENS.len());
        for rule in PascalParser::RULES.iter().chain(PascalParser::TOKENS) {
            assert!(tables.class_of(*rule).is_some(), "{rule:?} is unclassified");
        }
        assert_eq!(tables.class_of(Rule::EOI), Some(NodeClass::Skipped));
    }

    #[test]
    fn default_entry_rule_is_declared() {
        let tables = GrammarTables::build::<PascalParser>();
        assert_eq!(tables.rule_names.position(DEFAULT_ENTRY_RULE), Some(0));
    }

    #[test]
    fn comments_are_skippable_trailing_text() {
        assert!(PascalParser::is_skippable(""));
        assert!(PascalParser::is_skippable("  // done\n"));
        assert!(PascalParser::is_skippable(" { note } (* more *)\n"));
        assert!(!PascalParser::is_skippable(" ))))"));
        assert!(!PascalParser::is_skippable(" { unterminated"));
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert!(PascalParser::parse(Rule::IDENT, "begin").is_err());
        assert!(PascalParser::parse(Rule::IDENT, "beginning").is_ok());
        assert!(PascalParser::parse(Rule::BEGIN, "BEGIN").is_ok());
    }
}
