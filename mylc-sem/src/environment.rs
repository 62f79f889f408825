//! `ProgramEnvironment`: the cross-module symbol universe the scanner
//! populates and every later stage reads from.

use std::rc::Rc;

use indexmap::IndexMap;
use mylc_par::ast::{GlobalDecl, Module};
use mylc_util::SourcePos;
use rustc_hash::FxHashSet;

use crate::error::{SemanticError, SemanticResult};
use crate::symbol_table::{Symbol, SymbolTable};

/// One logical module's accumulated state: every `import` line seen
/// across all fragments sharing its name, and its symbol table.
#[derive(Debug, Default)]
pub struct ModuleInfo {
    /// Import name -> should_export, merged by logical OR across
    /// fragments and duplicate `import` lines within one fragment.
    imports: IndexMap<String, bool>,
    pub symbol_table: SymbolTable,
}

impl ModuleInfo {
    pub fn add_imports(&mut self, fragment_imports: &[mylc_par::ast::ModuleImport]) {
        for import in fragment_imports {
            let name = import.name.lexeme.clone();
            self.imports
                .entry(name)
                .and_modify(|should_export| *should_export |= import.should_export)
                .or_insert(import.should_export);
        }
    }

    /// Iterates imports in first-seen order, each with the merged
    /// `should_export` flag.
    pub fn imports(&self) -> impl Iterator<Item = (&str, bool)> {
        self.imports.iter().map(|(name, &should_export)| (name.as_str(), should_export))
    }

    pub fn reexported_imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().filter(|(_, &export)| export).map(|(name, _)| name.as_str())
    }
}

/// Maps module name to its accumulated `ModuleInfo`. Written only by the
/// global symbol scanner; read thereafter.
#[derive(Debug, Default)]
pub struct ProgramEnvironment {
    modules: IndexMap<String, ModuleInfo>,
}

impl ProgramEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotently creates (or extends) the named module's entry and
    /// unions its import directives into the accumulated set.
    pub fn add_module_declaration(&mut self, module: &Module) {
        let info = self.modules.entry(module.name.lexeme.clone()).or_default();
        info.add_imports(&module.imports);
    }

    pub fn module(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut ModuleInfo> {
        self.modules.get_mut(name)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn open_scope(&mut self, module_name: &str) {
        if let Some(info) = self.module_mut(module_name) {
            info.symbol_table.open_scope();
        }
    }

    pub fn close_scope(&mut self, module_name: &str) {
        if let Some(info) = self.module_mut(module_name) {
            info.symbol_table.close_scope();
        }
    }

    pub fn add_symbol(
        &mut self,
        module_name: &str,
        decl: Rc<GlobalDecl>,
        is_public: bool,
        pos: SourcePos,
    ) -> SemanticResult<()> {
        let name = decl.name().lexeme.clone();
        let info = self
            .modules
            .get_mut(module_name)
            .expect("module must be registered via add_module_declaration before add_symbol");

        if info.symbol_table.has_local_collision(&name) {
            return Err(SemanticError::SymbolRedefinition { name, pos });
        }

        info.symbol_table.add_symbol(name, decl, is_public);
        Ok(())
    }

    /// Two-phase lookup:
    /// 1. Local lookup in `module_name`'s own table, any visibility.
    /// 2. A cycle-safe recursive search through `module_name`'s
    ///    re-exported imports, where only `is_public` symbols of the
    ///    imported module (and transitively, only its own re-exported
    ///    imports) are visible.
    pub fn find_symbol(&self, module_name: &str, name: &str) -> Option<&Symbol> {
        let info = self.module(module_name)?;

        if let Some(symbol) = info.symbol_table.find_symbol(name) {
            return Some(symbol);
        }

        let mut visited = FxHashSet::default();
        visited.insert(module_name.to_string());

        // The starting module's own imports are all searched, whether or
        // not they are re-exported: a private import still grants this
        // module access to the imported module's public symbols, it just
        // doesn't propagate that access to modules importing *this* one.
        for (imported, _) in info.imports() {
            if let Some(symbol) = self.find_public_symbol(imported, name, &mut visited) {
                return Some(symbol);
            }
        }

        None
    }

    /// Recursive step of phase 2: only symbols marked `is_public` are
    /// visible, and recursion continues only through modules the
    /// current module itself re-exports.
    fn find_public_symbol<'a>(
        &'a self,
        module_name: &str,
        name: &str,
        visited: &mut FxHashSet<String>,
    ) -> Option<&'a Symbol> {
        if !visited.insert(module_name.to_string()) {
            return None;
        }

        let info = self.module(module_name)?;

        if let Some(symbol) = info.symbol_table.find_symbol(name) {
            if symbol.is_public {
                return Some(symbol);
            }
        }

        for imported in info.reexported_imports() {
            if let Some(symbol) = self.find_public_symbol(imported, name, visited) {
                return Some(symbol);
            }
        }

        None
    }
}
