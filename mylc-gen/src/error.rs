//! Code generator error taxonomy.

use mylc_util::IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("module \"{0}\" was never registered in the program environment")]
    UnknownModule(String),
}

pub type CodegenResult<T> = std::result::Result<T, CodegenError>;
