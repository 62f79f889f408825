//! Lexical analyzer for MyLang.
//!
//! Turns raw source text into a token stream, tracking source positions
//! and never aborting outright on malformed input: unrecognized lexemes
//! turn into `Token::Error` entries alongside a recorded diagnostic.

mod error;
mod lexer;
mod source;
mod token;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use source::{CharSource, SourceChar};
pub use token::{Token, TokenKind};
