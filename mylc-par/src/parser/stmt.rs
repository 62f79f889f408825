//! Statement parsing, including the `for`-loop clause disambiguation and
//! the braced variable initializer grammar.

use mylc_lex::TokenKind;

use crate::ast::{ForInit, JumpStmt, Stmt, VarDeclStmt, VarInit};
use crate::error::ParseResult;

use super::core::Parser;

impl Parser {
    /// `stmt ::= compound | if-stmt | for-stmt | while-stmt`
    ///        `| var-decl-stmt | jump-stmt | expr-stmt`
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        if self.check(TokenKind::LBrace) {
            return self.parse_compound();
        }
        if self.check(TokenKind::If) {
            return self.parse_if_stmt();
        }
        if self.check(TokenKind::For) {
            return self.parse_for_stmt();
        }
        if self.check(TokenKind::While) {
            return self.parse_while_stmt();
        }
        if matches!(self.peek_kind(0), TokenKind::Return | TokenKind::Break | TokenKind::Continue) {
            return Ok(Stmt::Jump(self.parse_jump_stmt()?));
        }
        if self.can_start_var_decl() {
            let decl = self.parse_var_decl().map_err(|e| e.wrap("var-decl-stmt"))?;
            self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("var-decl-stmt"))?;
            return Ok(Stmt::VarDecl(decl));
        }

        let expr = self.parse_expr().map_err(|e| e.wrap("expr-stmt"))?;
        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("expr-stmt"))?;
        Ok(Stmt::Expr(Box::new(expr)))
    }

    /// `compound ::= "{" stmt* "}"`
    fn parse_compound(&mut self) -> ParseResult<Stmt> {
        self.accept(TokenKind::LBrace).map_err(|e| e.wrap("compound"))?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.accept(TokenKind::RBrace).map_err(|e| e.wrap("compound"))?;
        Ok(Stmt::Compound(stmts))
    }

    /// `if-stmt ::= "if" "(" expr ")" compound ("else" (if-stmt | compound))?`
    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.accept(TokenKind::If).map_err(|e| e.wrap("if-stmt"))?;
        self.accept(TokenKind::LParen).map_err(|e| e.wrap("if-stmt"))?;
        let condition = Box::new(self.parse_expr().map_err(|e| e.wrap("if-stmt"))?);
        self.accept(TokenKind::RParen).map_err(|e| e.wrap("if-stmt"))?;
        let then_branch = Box::new(self.parse_compound().map_err(|e| e.wrap("if-stmt"))?);

        let else_branch = if self.optional_accept(TokenKind::Else).is_some() {
            if self.check(TokenKind::If) {
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                Some(Box::new(self.parse_compound().map_err(|e| e.wrap("if-stmt"))?))
            }
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    /// `while-stmt ::= "while" "(" expr ")" compound`
    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.accept(TokenKind::While).map_err(|e| e.wrap("while-stmt"))?;
        self.accept(TokenKind::LParen).map_err(|e| e.wrap("while-stmt"))?;
        let condition = Box::new(self.parse_expr().map_err(|e| e.wrap("while-stmt"))?);
        self.accept(TokenKind::RParen).map_err(|e| e.wrap("while-stmt"))?;
        let body = Box::new(self.parse_compound().map_err(|e| e.wrap("while-stmt"))?);
        Ok(Stmt::While { condition, body })
    }

    /// `for-stmt ::= "for" "(" (var-decl | expr-stmt | ";") expr? ";" expr? ")" compound`
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.accept(TokenKind::For).map_err(|e| e.wrap("for-stmt"))?;
        self.accept(TokenKind::LParen).map_err(|e| e.wrap("for-stmt"))?;

        let init = if self.can_start_var_decl() {
            let decl = self.parse_var_decl().map_err(|e| e.wrap("for-stmt"))?;
            self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("for-stmt"))?;
            ForInit::VarDecl(decl)
        } else if self.optional_accept(TokenKind::Semicolon).is_some() {
            ForInit::Empty
        } else {
            let expr = self.parse_expr().map_err(|e| e.wrap("for-stmt"))?;
            self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("for-stmt"))?;
            ForInit::Expr(Box::new(expr))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expr().map_err(|e| e.wrap("for-stmt"))?))
        };
        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("for-stmt"))?;

        let increment = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expr().map_err(|e| e.wrap("for-stmt"))?))
        };
        self.accept(TokenKind::RParen).map_err(|e| e.wrap("for-stmt"))?;

        let body = Box::new(self.parse_compound().map_err(|e| e.wrap("for-stmt"))?);

        Ok(Stmt::For { init: Box::new(init), condition, increment, body })
    }

    /// `jump-stmt ::= ("return" expr? | "break" | "continue") ";"`
    ///
    /// The trailing `;` is mandatory, per the Design Notes decision
    /// (stricter than the reference parser's inconsistent enforcement).
    fn parse_jump_stmt(&mut self) -> ParseResult<JumpStmt> {
        let jump = if let Some(keyword) = self.optional_accept(TokenKind::Return) {
            let value = if self.check(TokenKind::Semicolon) {
                None
            } else {
                Some(Box::new(self.parse_expr().map_err(|e| e.wrap("jump-stmt"))?))
            };
            JumpStmt::Return { keyword, value }
        } else if let Some(keyword) = self.optional_accept(TokenKind::Break) {
            JumpStmt::Break { keyword }
        } else {
            let keyword = self.accept(TokenKind::Continue).map_err(|e| e.wrap("jump-stmt"))?;
            JumpStmt::Continue { keyword }
        };

        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("jump-stmt"))?;
        Ok(jump)
    }

    fn can_start_var_decl(&mut self) -> bool {
        self.check(TokenKind::Identifier) && self.peek_kind(1) == TokenKind::Colon
    }

    /// `var-decl ::= IDENT ":" type "=" var-init`
    pub(crate) fn parse_var_decl(&mut self) -> ParseResult<VarDeclStmt> {
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("var-decl"))?;
        self.accept(TokenKind::Colon).map_err(|e| e.wrap("var-decl"))?;
        let ty = self.parse_type().map_err(|e| e.wrap("var-decl"))?;
        self.accept(TokenKind::Assign).map_err(|e| e.wrap("var-decl"))?;
        let init = self.parse_var_init().map_err(|e| e.wrap("var-decl"))?;
        Ok(VarDeclStmt { name, ty, init })
    }

    /// `var-init ::= expr | "{" var-init ("," var-init)* "}"`
    fn parse_var_init(&mut self) -> ParseResult<VarInit> {
        if self.optional_accept(TokenKind::LBrace).is_some() {
            let mut elements = vec![self.parse_var_init()?];
            while self.optional_accept(TokenKind::Comma).is_some() {
                elements.push(self.parse_var_init()?);
            }
            self.accept(TokenKind::RBrace).map_err(|e| e.wrap("var-init"))?;
            Ok(VarInit::List(elements))
        } else {
            let expr = self.parse_expr().map_err(|e| e.wrap("var-init"))?;
            Ok(VarInit::Expr(Box::new(expr)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::ast::{ForInit, GlobalDecl, JumpStmt, Stmt};

    fn parse_body(source: &str) -> Stmt {
        let full = format!("module m;\nmain : func = () {source}\n");
        let (result, handler) = Parser::parse_source(&full);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        let module = result.expect("should parse");
        match &module.decls[0] {
            GlobalDecl::Func(f) => f.body.clone(),
            other => panic!("expected func decl, got {other:?}"),
        }
    }

    #[test]
    fn empty_for_loop_parses() {
        let body = parse_body("{ for (;;) {} }");
        match body {
            Stmt::Compound(stmts) => match &stmts[0] {
                Stmt::For { init, condition, increment, .. } => {
                    assert!(matches!(**init, ForInit::Empty));
                    assert!(condition.is_none());
                    assert!(increment.is_none());
                },
                other => panic!("expected for stmt, got {other:?}"),
            },
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_with_var_decl_init() {
        let body = parse_body("{ for (i: i32 = 0; i < 10; i += 1) {} }");
        match body {
            Stmt::Compound(stmts) => match &stmts[0] {
                Stmt::For { init, .. } => assert!(matches!(**init, ForInit::VarDecl(_))),
                other => panic!("expected for stmt, got {other:?}"),
            },
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn break_without_trailing_semicolon_is_rejected() {
        let full = "module m;\nmain : func = () { while (true) { break } }\n";
        let (result, _) = Parser::parse_source(full);
        assert!(result.is_err());
    }

    #[test]
    fn return_with_value() {
        let body = parse_body("{ return 1; }");
        match body {
            Stmt::Compound(stmts) => match &stmts[0] {
                Stmt::Jump(JumpStmt::Return { value, .. }) => assert!(value.is_some()),
                other => panic!("expected return, got {other:?}"),
            },
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn nested_var_init_list() {
        let body = parse_body("{ arr: i32[2][2] = {{1, 2}, {3, 4}}; }");
        match body {
            Stmt::Compound(stmts) => match &stmts[0] {
                Stmt::VarDecl(decl) => {
                    if let crate::ast::VarInit::List(outer) = &decl.init {
                        assert_eq!(outer.len(), 2);
                    } else {
                        panic!("expected VarInit::List");
                    }
                },
                other => panic!("expected var decl, got {other:?}"),
            },
            other => panic!("expected compound, got {other:?}"),
        }
    }
}
