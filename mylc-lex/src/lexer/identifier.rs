//! Identifier recognition and keyword/primitive-type/bool-literal
//! reclassification.

use super::core::{is_ident_continue, Lexer};
use crate::token::{Token, TokenKind};

impl Lexer {
    pub(super) fn lex_identifier(&mut self) -> Token {
        self.stream.accept();
        while is_ident_continue(self.stream.peek(0).ch) {
            self.stream.accept();
        }

        let lexeme = self.accept_history_lexeme();
        let kind = TokenKind::keyword_from_lexeme(&lexeme).unwrap_or(TokenKind::Identifier);
        let span = self.current_span();
        self.stream.clear_history();
        Token::new(kind, lexeme, span)
    }
}
