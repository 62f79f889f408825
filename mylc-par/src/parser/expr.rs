//! Expression parsing: the `expr -> or-expr -> and-expr -> cmp-expr ->
//! add-expr -> mul-expr -> prefix-expr -> postfix-expr -> primary`
//! precedence chain, implemented as classic recursive descent rather
//! than Pratt parsing, matching the grammar's explicit rule nesting.

use mylc_lex::TokenKind;

use crate::ast::{AssignOp, BinOp, Expr, Literal, PostfixOp, PrefixOp};
use crate::error::ParseResult;

use super::core::Parser;

const ASSIGN_OPS: &[TokenKind] = &[
    TokenKind::Assign,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
];

const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::Less,
    TokenKind::LessEq,
    TokenKind::Greater,
    TokenKind::GreaterEq,
];

const PREFIX_OPS: &[TokenKind] =
    &[TokenKind::Bang, TokenKind::Plus, TokenKind::Minus, TokenKind::PlusPlus, TokenKind::MinusMinus];

fn assign_op_from(kind: TokenKind) -> AssignOp {
    match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        other => unreachable!("not an assign-op token kind: {other:?}"),
    }
}

fn comparison_bin_op_from(kind: TokenKind) -> BinOp {
    match kind {
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::NotEq,
        TokenKind::Less => BinOp::Less,
        TokenKind::LessEq => BinOp::LessEq,
        TokenKind::Greater => BinOp::Greater,
        TokenKind::GreaterEq => BinOp::GreaterEq,
        other => unreachable!("not a comparison token kind: {other:?}"),
    }
}

fn prefix_op_from(kind: TokenKind) -> PrefixOp {
    match kind {
        TokenKind::Bang => PrefixOp::Not,
        TokenKind::Plus => PrefixOp::Plus,
        TokenKind::Minus => PrefixOp::Neg,
        TokenKind::PlusPlus => PrefixOp::Incr,
        TokenKind::MinusMinus => PrefixOp::Decr,
        other => unreachable!("not a prefix-op token kind: {other:?}"),
    }
}

impl Parser {
    pub(crate) fn can_start_expr(&mut self) -> bool {
        matches!(
            self.peek_kind(0),
            TokenKind::Identifier
                | TokenKind::LParen
                | TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
                | TokenKind::BoolLiteral
                | TokenKind::Bang
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    /// `expr ::= IDENT assign-op expr | or-expr`
    ///
    /// Two tokens of lookahead tell assignment apart from an ordinary
    /// expression starting with an identifier (e.g. a bare variable read
    /// or the start of a function call).
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        if self.check(TokenKind::Identifier) && ASSIGN_OPS.contains(&self.peek_kind(1)) {
            return self.parse_assign_expr().map_err(|e| e.wrap("expr"));
        }
        self.parse_or_expr().map_err(|e| e.wrap("expr"))
    }

    fn parse_assign_expr(&mut self) -> ParseResult<Expr> {
        let name = self.accept(TokenKind::Identifier)?;
        let op_tok = self.accept_one_of(ASSIGN_OPS)?;
        let value = Box::new(self.parse_expr()?);
        Ok(Expr::Assign {
            target: Box::new(Expr::Identifier(name)),
            op: assign_op_from(op_tok.kind),
            value,
        })
    }

    fn parse_or_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_and_expr()?;
        while self.optional_accept(TokenKind::OrOr).is_some() {
            let rhs = self.parse_and_expr()?;
            expr = Expr::Binary { op: BinOp::Or, left: Box::new(expr), right: Box::new(rhs) };
        }
        Ok(expr)
    }

    fn parse_and_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_cmp_expr()?;
        while self.optional_accept(TokenKind::AndAnd).is_some() {
            let rhs = self.parse_cmp_expr()?;
            expr = Expr::Binary { op: BinOp::And, left: Box::new(expr), right: Box::new(rhs) };
        }
        Ok(expr)
    }

    fn parse_cmp_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_add_expr()?;
        while let Some(op_tok) = self.optional_accept_one_of(COMPARISON_OPS) {
            let rhs = self.parse_add_expr()?;
            expr = Expr::Binary {
                op: comparison_bin_op_from(op_tok.kind),
                left: Box::new(expr),
                right: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    fn parse_add_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_mul_expr()?;
        loop {
            let op = if self.optional_accept(TokenKind::Plus).is_some() {
                BinOp::Add
            } else if self.optional_accept(TokenKind::Minus).is_some() {
                BinOp::Sub
            } else {
                break;
            };
            let rhs = self.parse_mul_expr()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(rhs) };
        }
        Ok(expr)
    }

    fn parse_mul_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_prefix_expr()?;
        loop {
            let op = if self.optional_accept(TokenKind::Star).is_some() {
                BinOp::Mul
            } else if self.optional_accept(TokenKind::Slash).is_some() {
                BinOp::Div
            } else {
                break;
            };
            let rhs = self.parse_prefix_expr()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(rhs) };
        }
        Ok(expr)
    }

    /// `prefix-expr ::= prefix-op* postfix-expr`, right-recursive so
    /// `--x` and `!!x` both parse.
    fn parse_prefix_expr(&mut self) -> ParseResult<Expr> {
        if let Some(op_tok) = self.optional_accept_one_of(PREFIX_OPS) {
            let operand = Box::new(self.parse_prefix_expr()?);
            Ok(Expr::Prefix { op: prefix_op_from(op_tok.kind), operand })
        } else {
            self.parse_postfix_expr()
        }
    }

    /// `postfix-expr ::= primary ( "++"|"--" | "." IDENT | "[" expr "]" | "(" arg-list? ")" )*`
    fn parse_postfix_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.optional_accept(TokenKind::PlusPlus).is_some() {
                expr = Expr::Postfix { op: PostfixOp::Incr, operand: Box::new(expr) };
            } else if self.optional_accept(TokenKind::MinusMinus).is_some() {
                expr = Expr::Postfix { op: PostfixOp::Decr, operand: Box::new(expr) };
            } else if self.optional_accept(TokenKind::Dot).is_some() {
                let member = self.accept(TokenKind::Identifier)?;
                expr = Expr::MemberAccess { base: Box::new(expr), member };
            } else if self.optional_accept(TokenKind::LBracket).is_some() {
                let index = Box::new(self.parse_expr()?);
                self.accept(TokenKind::RBracket)?;
                expr = Expr::ArrayAccess { base: Box::new(expr), index };
            } else if self.optional_accept(TokenKind::LParen).is_some() {
                let mut args = Vec::new();
                if self.can_start_expr() {
                    args.push(self.parse_expr()?);
                    while self.optional_accept(TokenKind::Comma).is_some() {
                        args.push(self.parse_expr()?);
                    }
                }
                self.accept(TokenKind::RParen)?;
                expr = Expr::FuncCall { callee: Box::new(expr), args };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// `primary ::= LITERAL | IDENT | "(" expr ")"`
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek_kind(0) {
            TokenKind::IntLiteral => {
                let tok = self.accept(TokenKind::IntLiteral)?;
                let value: i64 = tok.lexeme.parse().unwrap_or(0);
                Ok(Expr::Literal(Literal::Int(value)))
            },
            TokenKind::FloatLiteral => {
                let tok = self.accept(TokenKind::FloatLiteral)?;
                let value: f64 = tok.lexeme.parse().unwrap_or(0.0);
                Ok(Expr::Literal(Literal::Float(value)))
            },
            TokenKind::StringLiteral => {
                let tok = self.accept(TokenKind::StringLiteral)?;
                let inner = tok.lexeme.trim_start_matches('"').trim_end_matches('"').to_string();
                Ok(Expr::Literal(Literal::Str(inner)))
            },
            TokenKind::BoolLiteral => {
                let tok = self.accept(TokenKind::BoolLiteral)?;
                Ok(Expr::Literal(Literal::Bool(tok.lexeme == "true")))
            },
            TokenKind::Identifier => {
                let tok = self.accept(TokenKind::Identifier)?;
                Ok(Expr::Identifier(tok))
            },
            TokenKind::LParen => {
                self.accept(TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.accept(TokenKind::RParen)?;
                Ok(expr)
            },
            _ => Err(crate::error::ParseError::UnexpectedToken {
                actual: self.peek_kind(0),
                expected: vec![
                    TokenKind::IntLiteral,
                    TokenKind::FloatLiteral,
                    TokenKind::StringLiteral,
                    TokenKind::BoolLiteral,
                    TokenKind::Identifier,
                    TokenKind::LParen,
                ],
                pos: self.current_pos(),
            }
            .wrap("primary")),
        }
    }
}

#[cfg(test)]
mod tests {
    use mylc_lex::Lexer;

    use super::Parser;

    fn parse_expr_str(source: &str) -> String {
        let (tokens, _) = Lexer::tokenize(source);
        let mut parser = Parser::from_tokens(tokens);
        parser.parse_expr().expect("should parse").to_string_repr()
    }

    /// Scenario 2 from the testable properties.
    #[test]
    fn precedence_scenario() {
        assert_eq!(parse_expr_str("1 + 2 * 3.0"), "(1 + (2 * 3.0))");
    }

    #[test]
    fn assignment_is_right_associative() {
        // Only plain identifiers are valid assignment targets per the
        // grammar; chained assignment recurses into `expr` for the RHS.
        assert_eq!(parse_expr_str("a = b = 1"), "(a = (b = 1))");
    }

    #[test]
    fn comparison_binds_looser_than_additive() {
        assert_eq!(parse_expr_str("1 + 2 < 3"), "((1 + 2) < 3)");
    }

    #[test]
    fn logical_and_binds_tighter_than_or() {
        assert_eq!(parse_expr_str("a || b && c"), "(a || (b && c))");
    }

    #[test]
    fn postfix_chain_member_then_call() {
        assert_eq!(parse_expr_str("obj.method(1, 2)"), "obj.method(1, 2)");
    }

    #[test]
    fn array_index_chain() {
        assert_eq!(parse_expr_str("grid[0][1]"), "grid[0][1]");
    }

    #[test]
    fn prefix_operators_stack() {
        assert_eq!(parse_expr_str("--x"), "--x");
        assert_eq!(parse_expr_str("!!flag"), "!!flag");
    }

    #[test]
    fn parenthesized_expr_overrides_precedence() {
        assert_eq!(parse_expr_str("(1 + 2) * 3"), "((1 + 2) * 3)");
    }
}
