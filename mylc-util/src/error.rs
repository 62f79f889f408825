//! Error types shared by multiple crates in the workspace.
//!
//! Stage-specific errors (lexical, syntax, semantic) live in their owning
//! crates; this module only holds the ones with no single natural owner.

use std::path::PathBuf;

use thiserror::Error;

/// Failures from the abstract output sink (`mylc-gen`) or from reading
/// input source files (`mylc-drv`).
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read source file {path}: {source}")]
    ReadFailed { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write output file {path}: {source}")]
    WriteFailed { path: PathBuf, #[source] source: std::io::Error },
}

pub type IoResult<T> = std::result::Result<T, IoError>;
