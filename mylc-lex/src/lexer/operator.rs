//! Multi-char operator recognition.
//!
//! Two-char operators are probed before falling back to their one-char
//! prefix, per the longest-match ordering in the component design.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    pub(super) fn lex_plus(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '+' {
            self.stream.accept();
            self.finish(TokenKind::PlusPlus)
        } else if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::PlusEq)
        } else {
            self.finish(TokenKind::Plus)
        }
    }

    pub(super) fn lex_minus(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '-' {
            self.stream.accept();
            self.finish(TokenKind::MinusMinus)
        } else if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::MinusEq)
        } else if self.stream.peek(0).ch == '>' {
            self.stream.accept();
            self.finish(TokenKind::Arrow)
        } else {
            self.finish(TokenKind::Minus)
        }
    }

    pub(super) fn lex_star(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::StarEq)
        } else {
            self.finish(TokenKind::Star)
        }
    }

    pub(super) fn lex_slash(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::SlashEq)
        } else {
            self.finish(TokenKind::Slash)
        }
    }

    pub(super) fn lex_equals(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::EqEq)
        } else {
            self.finish(TokenKind::Assign)
        }
    }

    pub(super) fn lex_bang(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::NotEq)
        } else {
            self.finish(TokenKind::Bang)
        }
    }

    pub(super) fn lex_less(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::LessEq)
        } else {
            self.finish(TokenKind::Less)
        }
    }

    pub(super) fn lex_greater(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '=' {
            self.stream.accept();
            self.finish(TokenKind::GreaterEq)
        } else {
            self.finish(TokenKind::Greater)
        }
    }

    pub(super) fn lex_ampersand(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '&' {
            self.stream.accept();
            self.finish(TokenKind::AndAnd)
        } else {
            self.report_error("unexpected character '&'".to_string());
            self.finish(TokenKind::Error)
        }
    }

    pub(super) fn lex_pipe(&mut self) -> Token {
        self.stream.accept();
        if self.stream.peek(0).ch == '|' {
            self.stream.accept();
            self.finish(TokenKind::OrOr)
        } else {
            self.report_error("unexpected character '|'".to_string());
            self.finish(TokenKind::Error)
        }
    }

    fn finish(&mut self, kind: TokenKind) -> Token {
        let lexeme = self.accept_history_lexeme();
        let span = self.current_span();
        self.stream.clear_history();
        Token::new(kind, lexeme, span)
    }
}
