//! String literal recognition.
//!
//! String literals are required to terminate on the same line they
//! started: hitting `\n` or end-of-input before the closing `"` is an
//! unterminated-string error (the Design Notes decision on single-line
//! string literals).

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    pub(super) fn lex_string(&mut self) -> Token {
        self.stream.accept(); // opening '"'

        loop {
            let ch = self.stream.peek(0).ch;
            if ch == '"' {
                self.stream.accept();
                let lexeme = self.accept_history_lexeme();
                let span = self.current_span();
                self.stream.clear_history();
                return Token::new(TokenKind::StringLiteral, lexeme, span);
            }
            if ch == '\n' || self.stream.is_finished() {
                let lexeme = self.accept_history_lexeme();
                let span = self.current_span();
                self.stream.clear_history();
                self.report_error("unterminated string literal".to_string());
                return Token::new(TokenKind::Error, lexeme, span);
            }
            self.stream.accept();
        }
    }
}
