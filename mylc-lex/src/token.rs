//! Token kinds produced by the lexer.

use mylc_util::{Sentinel, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BoolLiteral,
    Identifier,

    // Keywords
    For,
    While,
    Break,
    Continue,
    If,
    Else,
    Return,
    Struct,
    Func,
    Module,
    Import,
    Export,
    In,
    Out,
    InOut,

    // Primitive type names
    I32,
    F32,
    Bool,
    Str,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PlusPlus,
    MinusMinus,
    Assign,
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AndAnd,
    OrOr,
    Bang,
    Arrow,

    EndOfFile,
    Error,
}

impl TokenKind {
    /// The fixed identifier-reclassification table described in the
    /// lexer's component design: after matching `[A-Za-z_][A-Za-z_0-9]*`,
    /// an exact lexeme match against this table turns an `Identifier`
    /// into a keyword, primitive-type name, or boolean literal.
    pub fn keyword_from_lexeme(lexeme: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match lexeme {
            "for" => For,
            "while" => While,
            "break" => Break,
            "continue" => Continue,
            "if" => If,
            "else" => Else,
            "return" => Return,
            "struct" => Struct,
            "func" => Func,
            "module" => Module,
            "import" => Import,
            "export" => Export,
            "in" => In,
            "out" => Out,
            "inout" => InOut,
            "i32" => I32,
            "f32" => F32,
            "bool" => Bool,
            "str" => Str,
            "true" | "false" => BoolLiteral,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::EndOfFile, "", span)
    }
}

impl Sentinel for Token {
    fn is_sentinel(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}
