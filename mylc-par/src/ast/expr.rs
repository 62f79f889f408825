//! Expression nodes.

use mylc_lex::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Plus,
    Neg,
    Incr,
    Decr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Incr,
    Decr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Comparison and logical operators always yield `bool`; the other
    /// arithmetic operators yield the (matching) operand type.
    pub fn is_comparison_or_logical(self) -> bool {
        !matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}

/// An expression node. The AST exclusively owns its children: every
/// sub-expression is a `Box<Expr>`, never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Token),
    Literal(Literal),
    Prefix { op: PrefixOp, operand: Box<Expr> },
    Postfix { op: PostfixOp, operand: Box<Expr> },
    Binary { op: BinOp, left: Box<Expr>, right: Box<Expr> },
    Assign { target: Box<Expr>, op: AssignOp, value: Box<Expr> },
    MemberAccess { base: Box<Expr>, member: Token },
    ArrayAccess { base: Box<Expr>, index: Box<Expr> },
    FuncCall { callee: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    /// Whether this expression can appear on the left of an assignment.
    pub fn is_assignable_designator(&self) -> bool {
        matches!(self, Expr::Identifier(_) | Expr::MemberAccess { .. } | Expr::ArrayAccess { .. })
    }

    /// Renders the expression as fully parenthesized infix text, matching
    /// the reference generator's `to_string()` convention (also used as
    /// the expression pretty-printer for the round-trip testable
    /// property).
    pub fn to_string_repr(&self) -> String {
        match self {
            Expr::Identifier(tok) => tok.lexeme.clone(),
            Expr::Literal(lit) => literal_to_string(lit),
            Expr::Prefix { op, operand } => format!("{}{}", prefix_op_str(*op), operand.to_string_repr()),
            Expr::Postfix { op, operand } => format!("{}{}", operand.to_string_repr(), postfix_op_str(*op)),
            Expr::Binary { op, left, right } => {
                format!("({} {} {})", left.to_string_repr(), op.as_str(), right.to_string_repr())
            },
            Expr::Assign { target, op, value } => {
                format!("({} {} {})", target.to_string_repr(), op.as_str(), value.to_string_repr())
            },
            Expr::MemberAccess { base, member } => format!("{}.{}", base.to_string_repr(), member.lexeme),
            Expr::ArrayAccess { base, index } => {
                format!("{}[{}]", base.to_string_repr(), index.to_string_repr())
            },
            Expr::FuncCall { callee, args } => {
                let args_str: Vec<String> = args.iter().map(Expr::to_string_repr).collect();
                format!("{}({})", callee.to_string_repr(), args_str.join(", "))
            },
        }
    }
}

fn literal_to_string(lit: &Literal) -> String {
    match lit {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => format!("{v:?}"),
        Literal::Str(s) => format!("\"{s}\""),
        Literal::Bool(b) => b.to_string(),
    }
}

fn prefix_op_str(op: PrefixOp) -> &'static str {
    match op {
        PrefixOp::Not => "!",
        PrefixOp::Plus => "+",
        PrefixOp::Neg => "-",
        PrefixOp::Incr => "++",
        PrefixOp::Decr => "--",
    }
}

fn postfix_op_str(op: PostfixOp) -> &'static str {
    match op {
        PostfixOp::Incr => "++",
        PostfixOp::Decr => "--",
    }
}
