//! Recursive-descent parser turning a MyLang token stream into an AST.

pub mod ast;
pub mod error;
mod parser;
pub mod types;

pub use parser::Parser;

#[cfg(test)]
mod scenario_tests {
    use super::Parser;
    use crate::ast::GlobalDecl;

    /// Scenario 2: operator precedence renders with full parenthesization.
    #[test]
    fn expression_precedence_scenario() {
        let source = "module m;\nmain : func = () { return 1 + 2 * 3.0; }\n";
        let (result, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        let module = result.expect("should parse");

        let GlobalDecl::Func(func) = &module.decls[0] else {
            panic!("expected a function declaration");
        };
        let crate::ast::Stmt::Compound(stmts) = &func.body else {
            panic!("expected a compound body");
        };
        let crate::ast::Stmt::Jump(crate::ast::JumpStmt::Return { value, .. }) = &stmts[0] else {
            panic!("expected a return statement");
        };
        let expr = value.as_ref().expect("return should carry a value");
        assert_eq!(expr.to_string_repr(), "(1 + (2 * 3.0))");
    }

    #[test]
    fn full_module_with_import_struct_and_function_parses() {
        let source = r#"
module vector;

import export scalar;

export vec2 : struct = {
    x: f32;
    y: f32;
}

export add : func = (lhs: in vec2, rhs: in vec2) -> vec2 {
    result: vec2 = { lhs.x + rhs.x, lhs.y + rhs.y };
    return result;
}
"#;
        let (result, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        let module = result.expect("should parse");
        assert_eq!(module.name.lexeme, "vector");
        assert_eq!(module.imports.len(), 1);
        assert_eq!(module.decls.len(), 2);
    }

    #[test]
    fn malformed_source_reports_a_grammar_rule_trail() {
        let (result, _) = Parser::parse_source("module m;\nbroken : func = (\n");
        let err = result.expect_err("truncated function should not parse");
        let message = format!("{err}");
        assert!(message.contains("while parsing"));
    }
}
