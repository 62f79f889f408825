//! A single module's flat, scope-tagged symbol stack.

use std::rc::Rc;

use mylc_par::ast::GlobalDecl;

/// One declaration visible under some name at some nesting depth.
///
/// `decl` is reference-counted (mirroring the reference implementation's
/// `shared_ptr<Decl>`) since the same declaration is looked up from many
/// places — the type checker, the code generator, and recursive
/// cross-module symbol resolution — none of which outlive the
/// environment that owns the original `Rc`.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub decl: Rc<GlobalDecl>,
    pub is_public: bool,
    pub scope_level: u32,
}

/// An ordered stack of symbols with a current scope level. Scopes nest
/// strictly: `open_scope` only ever grows the level by one, and
/// `close_scope` pops back to the level it started from.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    current_scope_level: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_scope(&mut self) {
        self.current_scope_level += 1;
    }

    pub fn close_scope(&mut self) {
        self.current_scope_level -= 1;
        let floor = self.current_scope_level;
        self.entries.retain(|entry| entry.scope_level <= floor);
    }

    pub fn current_scope_level(&self) -> u32 {
        self.current_scope_level
    }

    /// Appends a symbol at the current scope level. The caller is
    /// responsible for having already checked for an ODR violation via
    /// [`SymbolTable::has_local_collision`].
    pub fn add_symbol(&mut self, name: String, decl: Rc<GlobalDecl>, is_public: bool) {
        let scope_level = self.current_scope_level;
        self.entries.push(Symbol { name, decl, is_public, scope_level });
    }

    /// Whether a symbol with this name already exists at the current
    /// scope level (the ODR-violation check `add_symbol` callers must
    /// run first).
    pub fn has_local_collision(&self, name: &str) -> bool {
        let floor = self.current_scope_level;
        self.entries.iter().any(|e| e.scope_level == floor && e.name == name)
    }

    /// Tail-first scan: the innermost matching name wins.
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.entries.iter().rev().find(|entry| entry.name == name)
    }

    pub fn global_public_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().filter(|e| e.scope_level == 0 && e.is_public)
    }

    pub fn global_private_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().filter(|e| e.scope_level == 0 && !e.is_public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mylc_lex::{Token, TokenKind};
    use mylc_par::ast::StructDecl;
    use mylc_util::{SourcePos, Span};

    fn dummy_struct(name: &str, should_export: bool) -> Rc<GlobalDecl> {
        let span = Span::point(SourcePos::start());
        let name_tok = Token::new(TokenKind::Identifier, name, span);
        Rc::new(GlobalDecl::Struct(StructDecl { should_export, name: name_tok, members: Vec::new() }))
    }

    #[test]
    fn innermost_scope_shadows_outer() {
        let mut table = SymbolTable::new();
        table.add_symbol("a".into(), dummy_struct("a", false), true);
        table.open_scope();
        table.add_symbol("a".into(), dummy_struct("a", false), false);
        assert_eq!(table.find_symbol("a").unwrap().scope_level, 1);
        table.close_scope();
        assert_eq!(table.find_symbol("a").unwrap().scope_level, 0);
    }

    #[test]
    fn collision_detection_is_scope_local() {
        let mut table = SymbolTable::new();
        table.add_symbol("a".into(), dummy_struct("a", false), true);
        assert!(table.has_local_collision("a"));
        table.open_scope();
        assert!(!table.has_local_collision("a"));
    }

    #[test]
    fn public_private_partition() {
        let mut table = SymbolTable::new();
        table.add_symbol("pub_one".into(), dummy_struct("pub_one", false), true);
        table.add_symbol("priv_one".into(), dummy_struct("priv_one", false), false);
        assert_eq!(table.global_public_symbols().count(), 1);
        assert_eq!(table.global_private_symbols().count(), 1);
    }
}
