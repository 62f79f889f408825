//! Lexical error taxonomy.

use mylc_util::SourcePos;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { pos: SourcePos },

    #[error("unexpected character '{ch}'")]
    UnknownChar { ch: char, pos: SourcePos },
}

impl LexError {
    pub fn pos(&self) -> SourcePos {
        match self {
            LexError::UnterminatedString { pos } => *pos,
            LexError::UnknownChar { pos, .. } => *pos,
        }
    }
}

pub type LexResult<T> = std::result::Result<T, LexError>;
