//! Module for parsing Gene Protein Reaction strings into AST values

use crate::io::gpr_parse::lexer::LexerError;
use crate::io::gpr_parse::parser::ParseError;
use crate::metabolic_model::model::Gpr;
use thiserror::Error;

mod lexer;
pub mod parser;
mod token;

/// Parse a Gene Protein Reaction string into a GPR tree
///
/// # Parameters
/// - `input`: &str representing the gene protein reaction rule
///
/// # Returns
/// - `Ok`: root node of the GPR tree
/// - `Err`: [`GprParseError`] describing the issue with the GPR rule
///
/// # Examples
/// ```rust
/// use fluxbridge_core::io::gpr_parse::parse_gpr;
/// let gpr_tree = parse_gpr("Rv0001 and Rv0002").unwrap();
/// assert_eq!(gpr_tree.to_string_id(), "(Rv0001 and Rv0002)");
/// ```
pub fn parse_gpr(input: &str) -> Result<Gpr, GprParseError> {
    // Convert the GPR string into tokens
    let tokens = lexer::Lexer::new(input).lex()?;

    // Now parse those tokens into a GPR tree
    let mut parser = parser::GprParser::new(tokens);
    let gpr = parser.parse()?;
    Ok(gpr)
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error)]
pub enum GprParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of GPR string to tokens): {0}")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to GPR tree): {0}")]
    ParsingError(#[from] ParseError),
}
