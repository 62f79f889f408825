//! Semantic error taxonomy: symbol resolution and type-checking failures.

use mylc_util::SourcePos;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    #[error("symbol '{name}' redefined at {pos}")]
    SymbolRedefinition { name: String, pos: SourcePos },

    #[error("unknown symbol '{name}' at {pos}")]
    UnknownSymbol { name: String, pos: SourcePos },

    #[error("type mismatch at {pos}: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String, pos: SourcePos },

    #[error("'{name}' at {pos} does not name a struct type")]
    InvalidStructReference { name: String, pos: SourcePos },

    #[error("'{member}' is not a member of struct '{struct_name}' at {pos}")]
    UnknownMember { struct_name: String, member: String, pos: SourcePos },

    #[error("'{keyword}' used outside of a loop at {pos}")]
    JumpOutsideLoop { keyword: String, pos: SourcePos },

    #[error("initializer at {pos} does not match the shape of the declared type: {reason}")]
    InitializerShapeMismatch { reason: String, pos: SourcePos },

    #[error("array access at {pos} requires an array-typed operand, found {found}")]
    NotAnArray { found: String, pos: SourcePos },

    #[error("index at {pos} must be an integer, found {found}")]
    NonIntegerIndex { found: String, pos: SourcePos },

    #[error("call at {pos} targets a non-function value of type {found}")]
    NotCallable { found: String, pos: SourcePos },

    #[error("call at {pos} passes {actual} argument(s), expected {expected}")]
    ArgumentCountMismatch { expected: usize, actual: usize, pos: SourcePos },

    #[error("assignment at {pos} targets a non-assignable expression")]
    NotAssignable { pos: SourcePos },
}

impl SemanticError {
    pub fn pos(&self) -> SourcePos {
        match self {
            SemanticError::SymbolRedefinition { pos, .. }
            | SemanticError::UnknownSymbol { pos, .. }
            | SemanticError::TypeMismatch { pos, .. }
            | SemanticError::InvalidStructReference { pos, .. }
            | SemanticError::UnknownMember { pos, .. }
            | SemanticError::JumpOutsideLoop { pos, .. }
            | SemanticError::InitializerShapeMismatch { pos, .. }
            | SemanticError::NotAnArray { pos, .. }
            | SemanticError::NonIntegerIndex { pos, .. }
            | SemanticError::NotCallable { pos, .. }
            | SemanticError::ArgumentCountMismatch { pos, .. }
            | SemanticError::NotAssignable { pos } => *pos,
        }
    }
}

pub type SemanticResult<T> = std::result::Result<T, SemanticError>;
