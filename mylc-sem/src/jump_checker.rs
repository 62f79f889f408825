//! Depth-counting walker rejecting `break`/`continue` outside a loop.

use mylc_par::ast::{JumpStmt, Stmt};

use crate::error::{SemanticError, SemanticResult};

#[derive(Default)]
pub struct JumpStmtChecker {
    loop_depth: u32,
}

impl JumpStmtChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_stmt(&mut self, stmt: &Stmt) -> SemanticResult<()> {
        match stmt {
            Stmt::Compound(stmts) => {
                for s in stmts {
                    self.check_stmt(s)?;
                }
                Ok(())
            },
            Stmt::If { then_branch, else_branch, .. } => {
                self.check_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch)?;
                }
                Ok(())
            },
            Stmt::For { body, .. } => {
                self.loop_depth += 1;
                let result = self.check_stmt(body);
                self.loop_depth -= 1;
                result
            },
            Stmt::While { body, .. } => {
                self.loop_depth += 1;
                let result = self.check_stmt(body);
                self.loop_depth -= 1;
                result
            },
            Stmt::Jump(jump) => self.check_jump(jump),
            Stmt::VarDecl(_) | Stmt::Expr(_) => Ok(()),
        }
    }

    fn check_jump(&self, jump: &JumpStmt) -> SemanticResult<()> {
        match jump {
            JumpStmt::Return { .. } => Ok(()),
            JumpStmt::Break { keyword } if self.loop_depth == 0 => {
                Err(SemanticError::JumpOutsideLoop { keyword: "break".into(), pos: keyword.span.start })
            },
            JumpStmt::Continue { keyword } if self.loop_depth == 0 => {
                Err(SemanticError::JumpOutsideLoop { keyword: "continue".into(), pos: keyword.span.start })
            },
            JumpStmt::Break { .. } | JumpStmt::Continue { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mylc_par::Parser;
    use mylc_par::ast::GlobalDecl;

    fn body_of(source: &str) -> Stmt {
        let full = format!("module m;\nmain : func = () {source}\n");
        let (result, handler) = Parser::parse_source(&full);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        match &result.unwrap().decls[0] {
            GlobalDecl::Func(f) => f.body.clone(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn break_inside_while_is_allowed() {
        let body = body_of("{ while (true) { break; } }");
        assert!(JumpStmtChecker::new().check_stmt(&body).is_ok());
    }

    #[test]
    fn break_at_function_scope_is_rejected() {
        let body = body_of("{ break; }");
        let err = JumpStmtChecker::new().check_stmt(&body).unwrap_err();
        assert!(matches!(err, SemanticError::JumpOutsideLoop { .. }));
    }

    #[test]
    fn break_inside_if_inside_while_is_allowed() {
        let body = body_of("{ while (true) { if (true) { break; } } }");
        assert!(JumpStmtChecker::new().check_stmt(&body).is_ok());
    }

    #[test]
    fn depth_restored_after_leaving_loop() {
        let body = body_of("{ for (;;) { continue; } break; }");
        let err = JumpStmtChecker::new().check_stmt(&body).unwrap_err();
        assert!(matches!(err, SemanticError::JumpOutsideLoop { .. }));
    }
}
