//! Parser error taxonomy.
//!
//! There is no error recovery: the first error a parse routine raises
//! propagates straight to the driver. Routines catch subordinate errors
//! and wrap them in `PatternMismatch` so the rendered message carries a
//! grammar-rule trail (e.g. "while parsing func-decl: while parsing
//! param: unexpected token").

use mylc_lex::{Token, TokenKind};
use mylc_util::SourcePos;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected token {actual:?} at {pos}, expected one of {expected:?}")]
    UnexpectedToken { actual: TokenKind, expected: Vec<TokenKind>, pos: SourcePos },

    #[error("while parsing {pattern_name}: {inner}")]
    PatternMismatch { pattern_name: &'static str, inner: Box<ParseError> },

    #[error("leftover tokens starting at {pos}")]
    LeftoverTokens { token: Token, pos: SourcePos },
}

impl ParseError {
    pub fn pos(&self) -> SourcePos {
        match self {
            ParseError::UnexpectedToken { pos, .. } => *pos,
            ParseError::PatternMismatch { inner, .. } => inner.pos(),
            ParseError::LeftoverTokens { pos, .. } => *pos,
        }
    }

    pub fn wrap(self, pattern_name: &'static str) -> ParseError {
        ParseError::PatternMismatch { pattern_name, inner: Box::new(self) }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
