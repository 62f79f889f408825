//! Token-stream plumbing shared by every grammar-rule parsing routine.

use mylc_lex::{Lexer, Token, TokenKind};
use mylc_util::{BufferedStream, Handler, SourcePos, Span};

use crate::error::{ParseError, ParseResult};

pub struct Parser {
    pub(crate) stream: BufferedStream<Token>,
}

impl Parser {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let eof = tokens
            .last()
            .cloned()
            .unwrap_or_else(|| Token::eof(Span::point(SourcePos::start())));
        Self { stream: BufferedStream::new(tokens.into_iter(), eof) }
    }

    /// Convenience entry point that runs the lexer first. Lexical errors
    /// (if any) are returned via the `Handler` alongside whatever parse
    /// result was produced from the token stream the lexer still emitted.
    pub fn parse_source(source: &str) -> (ParseResult<crate::ast::Module>, Handler) {
        let (tokens, handler) = Lexer::tokenize(source);
        let mut parser = Parser::from_tokens(tokens);
        (parser.parse_program(), handler)
    }

    pub(crate) fn peek_kind(&mut self, offset: usize) -> TokenKind {
        self.stream.peek(offset).kind
    }

    pub(crate) fn current_pos(&mut self) -> SourcePos {
        self.stream.peek(0).span.start
    }

    pub(crate) fn check(&mut self, kind: TokenKind) -> bool {
        self.peek_kind(0) == kind
    }

    /// Consumes the current token if it matches `kind`; otherwise raises
    /// `UnexpectedToken`.
    pub(crate) fn accept(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            let token = self.stream.peek(0);
            self.stream.discard();
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                actual: self.peek_kind(0),
                expected: vec![kind],
                pos: self.current_pos(),
            })
        }
    }

    pub(crate) fn accept_one_of(&mut self, kinds: &[TokenKind]) -> ParseResult<Token> {
        if kinds.contains(&self.peek_kind(0)) {
            let token = self.stream.peek(0);
            self.stream.discard();
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                actual: self.peek_kind(0),
                expected: kinds.to_vec(),
                pos: self.current_pos(),
            })
        }
    }

    pub(crate) fn optional_accept(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            let token = self.stream.peek(0);
            self.stream.discard();
            Some(token)
        } else {
            None
        }
    }

    pub(crate) fn optional_accept_one_of(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek_kind(0)) {
            let token = self.stream.peek(0);
            self.stream.discard();
            Some(token)
        } else {
            None
        }
    }

    /// `program ::= module-decl module-import* global-decl*`, followed by
    /// a mandatory end-of-file (anything left over is a `LeftoverTokens`
    /// error — parsing never partially consumes a file).
    pub fn parse_program(&mut self) -> ParseResult<crate::ast::Module> {
        let module = self.parse_module().map_err(|e| e.wrap("program"))?;

        if !self.check(TokenKind::EndOfFile) {
            return Err(ParseError::LeftoverTokens {
                token: self.stream.peek(0),
                pos: self.current_pos(),
            });
        }

        Ok(module)
    }
}
