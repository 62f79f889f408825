//! Aggregates every crate's error domain behind one top-level type for
//! `main()`, following `CompileError`'s pattern of a thin enum that also
//! carries a `PathBuf` alongside the lower-level error it wraps.

use std::path::PathBuf;

use mylc_gen::CodegenError;
use mylc_par::error::ParseError;
use mylc_sem::SemanticError;
use mylc_util::IoError;
use thiserror::Error;

/// Every user-visible variant renders as the spec-locked single line
/// `[<Kind> Error][Ln L, Col C] <message>`; the originating path is kept
/// for diagnostics upstream of this error but never appears in its
/// `Display`, since the reference driver's error form has no room for it.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("{diagnostic}")]
    Lex { path: PathBuf, diagnostic: mylc_util::Diagnostic },

    #[error("[Syntax Error][{}] {source}", .source.pos())]
    Parse { path: PathBuf, #[source] source: ParseError },

    #[error("[Semantic Error][{}] {source}", .source.pos())]
    Semantic { path: PathBuf, #[source] source: SemanticError },

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;
