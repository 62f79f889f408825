//! Uniform diagnostic rendering.
//!
//! Every error domain in the workspace (lexical, syntax, semantic, I/O)
//! eventually gets rendered through `Diagnostic` so the user always sees
//! the same `[<Kind> Error][Ln L, Col C] <message>` shape regardless of
//! which stage raised it.

use std::fmt;

use crate::span::SourcePos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
    Io,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Lexical => "Lexical",
            DiagnosticKind::Syntax => "Syntax",
            DiagnosticKind::Semantic => "Semantic",
            DiagnosticKind::Io => "IO",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub pos: SourcePos,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, pos: SourcePos, message: impl Into<String>) -> Self {
        Self { kind, pos, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} Error][{}] {}", self.kind, self.pos, self.message)
    }
}

/// Accumulates diagnostics emitted over the course of a compilation.
///
/// Per the fail-fast propagation model, the driver stops advancing stages
/// the moment a stage reports any error here, but a `Handler` can still
/// collect more than one before that happens (e.g. several recognizer
/// failures within a single lexer pass).
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_the_documented_shape() {
        let diag = Diagnostic::new(DiagnosticKind::Semantic, SourcePos::new(3, 7), "break outside loop");
        assert_eq!(diag.to_string(), "[Semantic Error][Ln 3, Col 7] break outside loop");
    }

    #[test]
    fn handler_tracks_error_presence() {
        let mut handler = Handler::new();
        assert!(!handler.has_errors());
        handler.emit(Diagnostic::new(DiagnosticKind::Lexical, SourcePos::start(), "bad char"));
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 1);
    }
}
