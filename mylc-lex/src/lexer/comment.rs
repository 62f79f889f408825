//! Line-comment skipping.
//!
//! MyLang supports `//` line comments, consumed as part of whitespace
//! skipping (see the Design Notes decision to support at least this much
//! even though the distilled grammar leaves comments unspecified).

use super::core::Lexer;

impl Lexer {
    pub(super) fn skip_line_comment(&mut self) {
        // Consume the leading `//`.
        self.stream.discard();
        self.stream.discard();
        loop {
            let ch = self.stream.peek(0).ch;
            if ch == '\n' || self.stream.is_finished() {
                break;
            }
            self.stream.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn line_comment_is_skipped() {
        let (tokens, handler) = Lexer::tokenize("// comment\ni32");
        assert!(!handler.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::I32);
        assert_eq!(tokens[1].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn comment_at_eof_with_no_trailing_newline() {
        let (tokens, _handler) = Lexer::tokenize("x // trailing");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::EndOfFile);
    }
}
