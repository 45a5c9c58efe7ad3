use crate::io::gpr_parse::token::Token;
use crate::metabolic_model::model::{Gpr, GprOperatorType};

use thiserror::Error;
/*
GPR Grammar:
expression -> binary
binary -> primary (("AND" | "OR") primary )*;
primary -> GENE | "(" expression ")" ;

e.g. ( Gene1 AND Gene2 ) OR Gene3
 */

/// GPR Parser
pub struct GprParser {
    /// Vector of tokens from the GPR string
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl GprParser {
    /// Create a new GprParser
    pub fn new(tokens: Vec<Token>) -> GprParser {
        GprParser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into a GPR AST
    pub fn parse(&mut self) -> Result<Gpr, ParseError> {
        let gpr = self.binary()?;
        if !self.is_at_end() {
            // If the entire expression has not been consumed, an error has occurred
            return Err(ParseError::EarlyTermination);
        }
        Ok(gpr)
    }

    fn binary(&mut self) -> Result<Gpr, ParseError> {
        let mut expr = self.primary()?;

        while self.match_token(&[Token::And, Token::Or]) {
            let operator: GprOperatorType = match self.previous() {
                Token::Or => GprOperatorType::Or,
                Token::And => GprOperatorType::And,
                _ => return Err(ParseError::InvalidBinaryOperator),
            };
            let right = self.primary()?;
            expr = Gpr::new_binary_operation(expr, operator, right);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Gpr, ParseError> {
        if let Some(identifier) = self.match_identifier() {
            return Ok(Gpr::new_gene_node(&identifier));
        }

        if self.match_token(&[Token::LeftParen]) {
            let expr = self.binary()?;
            self.consume(Token::RightParen, "Expect ')' after expression.")?;
            return Ok(expr);
        }

        Err(ParseError::ExpectedExpression)
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// Check whether the token at the current position matches one of the provided `tokens`,
    /// if it does advance `self.current` and return true, otherwise return false
    fn match_token(&mut self, tokens: &[Token]) -> bool {
        for t in tokens {
            if self.check(t) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Similar to [`Self::match_token`], but for matching an identifier token. If the current
    /// token is an identifier return `Some(GeneId)`, where GeneId is the gene's string identifier,
    /// otherwise return None
    fn match_identifier(&mut self) -> Option<String> {
        if self.is_at_end() {
            return None;
        }
        if let Token::Identifier(id) = self.peek() {
            self.advance();
            return Some(id);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek() == *token
    }

    /// Advance `self.current` one position unless at end of the token Vec, then return the
    /// previous token.
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Check whether the parser is at the end of the token Vec
    fn is_at_end(&self) -> bool {
        self.peek() == Token::Eof
    }

    /// Get a copy of the current token
    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    /// Get a copy of the previous token
    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    /// Check whether the current token matches an input token, if it matches advance to the
    /// next token, and if it doesn't return an error. Used mainly for matching parenthesis.
    fn consume(&mut self, token: Token, msg: &str) -> Result<Token, ParseError> {
        if self.check(&token) {
            return Ok(self.advance());
        }

        Err(ParseError::MissingToken(msg.to_string()))
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// Token was expected to be a binary operator but was not
    #[error("Invalid binary operator encountered, expected only `and` and `or`")]
    InvalidBinaryOperator,
    /// Missing expected token (e.g. a right parenthesis)
    #[error("Missing expected token: {0}")]
    MissingToken(String),
    /// No expression found when one was expected
    #[error("No expression found, check that the GPR string is not empty")]
    ExpectedExpression,
    /// Expression was not completed when parsing terminated
    #[error("Parsing terminated early, check for adjacent gene identifiers without an operator")]
    EarlyTermination,
}
