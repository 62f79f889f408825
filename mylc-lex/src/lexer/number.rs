//! Numeric literal recognition.
//!
//! A run of digits optionally continues into a fractional part, but only
//! if at least one digit follows the `.` — otherwise the `.` is left
//! untouched for whatever token comes next (e.g. `arr[3].len` must not
//! swallow the member-access dot into `3.`).

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    pub(super) fn lex_number(&mut self) -> Token {
        while self.stream.peek(0).ch.is_ascii_digit() {
            self.stream.accept();
        }

        let mut kind = TokenKind::IntLiteral;

        self.stream.mark_checkpoint();
        if self.stream.peek(0).ch == '.' && self.stream.peek(1).ch.is_ascii_digit() {
            self.stream.accept(); // '.'
            while self.stream.peek(0).ch.is_ascii_digit() {
                self.stream.accept();
            }
            kind = TokenKind::FloatLiteral;
        } else {
            // Either there's no '.' at all, or it isn't followed by a
            // digit; in the latter case nothing was accepted since the
            // checkpoint, so this rewind is a no-op but keeps the logic
            // uniform.
            self.stream.rewind();
        }

        let lexeme = self.accept_history_lexeme();
        let span = self.current_span();
        self.stream.clear_history();
        Token::new(kind, lexeme, span)
    }
}
