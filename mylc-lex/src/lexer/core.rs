//! Core lexer implementation: dispatches each call of `next_token` to the
//! recognizer for whichever character starts the next token.

use mylc_util::{BufferedStream, Diagnostic, DiagnosticKind, Handler, SourcePos, Span};

use crate::source::{CharSource, SourceChar};
use crate::token::{Token, TokenKind};

/// Tokenizes MyLang source text.
///
/// The lexer never fails outright: unrecognized input produces a single
/// `Error` token (with the failure also recorded in its [`Handler`]) and
/// scanning continues from the next character.
pub struct Lexer {
    pub(crate) stream: BufferedStream<SourceChar>,
    pub(crate) handler: Handler,
    pub(crate) token_start: SourcePos,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let last_pos = source_end_pos(source);
        let stream = BufferedStream::new(CharSource::new(source), SourceChar::eof(last_pos));
        Self { stream, handler: Handler::new(), token_start: SourcePos::start() }
    }

    /// Runs the lexer to completion and returns the token stream together
    /// with whatever diagnostics were raised along the way.
    pub fn tokenize(source: &str) -> (Vec<Token>, Handler) {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, lexer.handler)
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Returns the next token in the source stream, or `Token::Eof` once
    /// the underlying character stream is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.stream.peek(0).pos;

        if self.stream.is_finished() {
            return Token::eof(Span::point(self.token_start));
        }

        match self.stream.peek(0).ch {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            ':' => self.single(TokenKind::Colon),
            '.' => self.single(TokenKind::Dot),
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_identifier(),
            c => {
                self.stream.accept();
                self.report_error(format!("unexpected character '{c}'"));
                Token::new(TokenKind::Error, c.to_string(), self.current_span())
            },
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let ch = self.stream.peek(0).ch;
        self.stream.accept();
        Token::new(kind, ch.to_string(), self.current_span())
    }

    /// `Span.end` is the position of the last accepted char of the
    /// current lexeme, not the next (unconsumed) char -- callers must
    /// invoke this before `clear_history()` discards the accept buffer.
    pub(crate) fn current_span(&mut self) -> Span {
        let end = self.stream.accept_history().last().map_or(self.token_start, |c| c.pos);
        Span::new(self.token_start, end)
    }

    pub(crate) fn accept_history_lexeme(&self) -> String {
        self.stream.accept_history().iter().map(|c| c.ch).collect()
    }

    pub(crate) fn report_error(&mut self, message: String) {
        self.handler.emit(Diagnostic::new(DiagnosticKind::Lexical, self.token_start, message));
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.stream.peek(0).ch {
                ' ' | '\t' | '\n' | '\r' => self.stream.discard(),
                '/' if self.stream.peek(1).ch == '/' => self.skip_line_comment(),
                _ => break,
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn source_end_pos(source: &str) -> SourcePos {
    let mut line = 1u32;
    let mut column = 1u32;
    for ch in source.chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    SourcePos::new(line, column)
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            None
        } else {
            Some(token)
        }
    }
}
