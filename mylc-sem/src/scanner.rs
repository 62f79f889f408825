//! Global symbol pre-pass: populates a `ProgramEnvironment` from every
//! parsed module fragment before any type checking begins.

use std::rc::Rc;

use mylc_par::ast::Module;

use crate::environment::ProgramEnvironment;
use crate::error::SemanticResult;

/// Visits only `Module`, `FuncDecl`, and `StructDecl` nodes — it never
/// descends into function bodies. Must run over *every* parsed fragment
/// before type checking starts: struct-type validity and call resolution
/// both depend on symbols declared in other files.
pub struct GlobalSymbolScanner<'a> {
    env: &'a mut ProgramEnvironment,
}

impl<'a> GlobalSymbolScanner<'a> {
    pub fn new(env: &'a mut ProgramEnvironment) -> Self {
        Self { env }
    }

    pub fn scan(&mut self, module: &Module) -> SemanticResult<()> {
        self.env.add_module_declaration(module);

        for decl in &module.decls {
            let pos = decl.name().span.start;
            self.env.add_symbol(&module.name.lexeme, Rc::new(decl.clone()), decl.should_export(), pos)?;
        }

        Ok(())
    }

    pub fn scan_all<'m>(&mut self, modules: impl IntoIterator<Item = &'m Module>) -> SemanticResult<()> {
        for module in modules {
            self.scan(module)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mylc_par::Parser;

    #[test]
    fn scans_struct_and_function_into_environment() {
        let source = "module vector;\nexport vec2 : struct = { x: f32; y: f32; }\nlen : func = (v: in vec2) -> f32 { return v.x; }\n";
        let (result, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors());
        let module = result.unwrap();

        let mut env = ProgramEnvironment::new();
        GlobalSymbolScanner::new(&mut env).scan(&module).unwrap();

        let info = env.module("vector").unwrap();
        assert_eq!(info.symbol_table.global_public_symbols().count(), 1);
        assert_eq!(info.symbol_table.global_private_symbols().count(), 1);
    }

    #[test]
    fn duplicate_top_level_name_is_a_redefinition() {
        let source = "module m;\na : struct = {}\na : struct = {}\n";
        let (result, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors());
        let module = result.unwrap();

        let mut env = ProgramEnvironment::new();
        let err = GlobalSymbolScanner::new(&mut env).scan(&module).unwrap_err();
        assert!(matches!(err, crate::error::SemanticError::SymbolRedefinition { .. }));
    }
}
