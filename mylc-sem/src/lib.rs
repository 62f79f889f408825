//! Cross-module symbol tables and semantic validation for MyLang.

pub mod environment;
pub mod error;
pub mod jump_checker;
pub mod scanner;
pub mod symbol_table;
pub mod type_checker;

pub use environment::{ModuleInfo, ProgramEnvironment};
pub use error::{SemanticError, SemanticResult};
pub use jump_checker::JumpStmtChecker;
pub use scanner::GlobalSymbolScanner;
pub use symbol_table::{Symbol, SymbolTable};
pub use type_checker::TypeChecker;

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use mylc_par::Parser;

    /// Scenario 5: cycle-safe import lookup terminates rather than
    /// looping when the requested symbol genuinely does not exist.
    #[test]
    fn cycle_safe_import_scenario() {
        let (a, handler_a) = Parser::parse_source("module a;\nimport export b;\n");
        assert!(!handler_a.has_errors());
        let (b, handler_b) = Parser::parse_source("module b;\nimport export a;\n");
        assert!(!handler_b.has_errors());

        let mut env = ProgramEnvironment::new();
        let mut scanner = GlobalSymbolScanner::new(&mut env);
        scanner.scan(&a.unwrap()).unwrap();
        scanner.scan(&b.unwrap()).unwrap();

        assert!(env.find_symbol("a", "nonexistent").is_none());
    }

    /// Scenario 6: `break` outside of any loop raises a semantic error
    /// that carries the offending token's position.
    #[test]
    fn jump_misuse_scenario() {
        let (result, handler) = Parser::parse_source("module m;\nmain : func = () { break; }\n");
        assert!(!handler.has_errors());
        let module = result.unwrap();

        let mylc_par::ast::GlobalDecl::Func(func) = &module.decls[0] else {
            panic!("expected a function declaration");
        };

        let err = JumpStmtChecker::new().check_stmt(&func.body).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("break"));
    }
}
