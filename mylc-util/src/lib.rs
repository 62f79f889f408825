//! Shared primitives for the MyLang-to-C++ compiler: source positions,
//! symbol interning, diagnostic rendering, and the generic rewindable
//! stream the lexer and parser both build on.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod stream;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticKind, Handler};
pub use error::{IoError, IoResult};
pub use span::{SourcePos, Span};
pub use stream::{BufferedStream, Sentinel};
pub use symbol::Symbol;
