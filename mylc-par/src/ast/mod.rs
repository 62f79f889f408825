mod decl;
mod expr;
mod stmt;

pub use decl::{FuncDecl, GlobalDecl, Member, Module, ModuleImport, Param, StructDecl};
pub use expr::{AssignOp, BinOp, Expr, Literal, PostfixOp, PrefixOp};
pub use stmt::{ForInit, JumpStmt, Stmt, VarDeclStmt, VarInit};
