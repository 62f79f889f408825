//! `module-decl`, `module-import`, and the top-level `global-decl` dispatch.

use mylc_lex::TokenKind;

use crate::ast::{GlobalDecl, Module, ModuleImport};
use crate::error::ParseResult;

use super::core::Parser;

impl Parser {
    /// `module-decl ::= "module" IDENT ";"`
    pub(crate) fn parse_module(&mut self) -> ParseResult<Module> {
        self.accept(TokenKind::Module).map_err(|e| e.wrap("module-decl"))?;
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("module-decl"))?;
        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("module-decl"))?;

        let mut imports = Vec::new();
        while self.can_start_module_import() {
            imports.push(self.parse_module_import()?);
        }

        let mut decls = Vec::new();
        while self.can_start_global_decl() {
            decls.push(self.parse_global_decl()?);
        }

        Ok(Module { name, imports, decls })
    }

    fn can_start_module_import(&mut self) -> bool {
        self.check(TokenKind::Import)
    }

    /// `module-import ::= "import" "export"? IDENT ";"`
    fn parse_module_import(&mut self) -> ParseResult<ModuleImport> {
        self.accept(TokenKind::Import).map_err(|e| e.wrap("module-import"))?;
        let should_export = self.optional_accept(TokenKind::Export).is_some();
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("module-import"))?;
        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("module-import"))?;
        Ok(ModuleImport { should_export, name })
    }

    fn can_start_global_decl(&mut self) -> bool {
        // `export`? IDENT ":" ...
        if self.check(TokenKind::Export) {
            return true;
        }
        self.check(TokenKind::Identifier) && self.peek_kind(1) == TokenKind::Colon
    }

    /// `global-decl ::= "export"? IDENT ":" (func-decl | struct-decl)`
    fn parse_global_decl(&mut self) -> ParseResult<GlobalDecl> {
        let should_export = self.optional_accept(TokenKind::Export).is_some();
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("global-decl"))?;
        self.accept(TokenKind::Colon).map_err(|e| e.wrap("global-decl"))?;

        if self.check(TokenKind::Func) {
            Ok(GlobalDecl::Func(self.parse_func_decl(should_export, name)?))
        } else if self.check(TokenKind::Struct) {
            Ok(GlobalDecl::Struct(self.parse_struct_decl(should_export, name)?))
        } else {
            Err(crate::error::ParseError::UnexpectedToken {
                actual: self.peek_kind(0),
                expected: vec![TokenKind::Func, TokenKind::Struct],
                pos: self.current_pos(),
            }
            .wrap("global-decl"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;

    #[test]
    fn parses_module_header_with_imports() {
        let source = "module a;\nimport export b;\nimport c;\n";
        let (result, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors());
        let module = result.expect("should parse");
        assert_eq!(module.name.lexeme, "a");
        assert_eq!(module.imports.len(), 2);
        assert!(module.imports[0].should_export);
        assert!(!module.imports[1].should_export);
        assert!(module.decls.is_empty());
    }

    #[test]
    fn empty_file_fails_at_module_decl() {
        let (result, _) = Parser::parse_source("");
        let err = result.expect_err("empty file should not parse");
        assert!(format!("{err}").contains("module-decl"));
    }
}
