//! `type`, `base-type`, and `param-type` parsing.

use mylc_lex::TokenKind;

use crate::error::ParseResult;
use crate::types::{BaseType, ParamType, ParamUsage, PrimitiveType, Type};

use super::core::Parser;

impl Parser {
    /// `type ::= base-type ("[" INT "]")*`
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let base = self.parse_base_type().map_err(|e| e.wrap("type"))?;

        let mut array_dims = Vec::new();
        while self.check(TokenKind::LBracket) {
            self.accept(TokenKind::LBracket).map_err(|e| e.wrap("type"))?;
            let size_tok = self.accept(TokenKind::IntLiteral).map_err(|e| e.wrap("type"))?;
            let size: u32 = size_tok.lexeme.parse().map_err(|_| {
                crate::error::ParseError::UnexpectedToken {
                    actual: TokenKind::IntLiteral,
                    expected: vec![TokenKind::IntLiteral],
                    pos: size_tok.span.start,
                }
                .wrap("type")
            })?;
            self.accept(TokenKind::RBracket).map_err(|e| e.wrap("type"))?;
            array_dims.push(size);
        }

        Ok(Type::new(base, array_dims))
    }

    /// `base-type ::= "i32" | "f32" | "bool" | "str" | IDENT`
    ///             `| "[" "(" (param-type ("," param-type)*)? ")" ("->" type)? "]"`
    fn parse_base_type(&mut self) -> ParseResult<BaseType> {
        if let Some(tok) = self.optional_accept(TokenKind::I32) {
            let _ = tok;
            return Ok(BaseType::Primitive(PrimitiveType::I32));
        }
        if self.optional_accept(TokenKind::F32).is_some() {
            return Ok(BaseType::Primitive(PrimitiveType::F32));
        }
        if self.optional_accept(TokenKind::Bool).is_some() {
            return Ok(BaseType::Primitive(PrimitiveType::Bool));
        }
        if self.optional_accept(TokenKind::Str).is_some() {
            return Ok(BaseType::Primitive(PrimitiveType::Str));
        }
        if self.check(TokenKind::Identifier) {
            let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("base-type"))?;
            return Ok(BaseType::Struct(name));
        }
        if self.check(TokenKind::LBracket) {
            return self.parse_function_base_type();
        }

        Err(crate::error::ParseError::UnexpectedToken {
            actual: self.peek_kind(0),
            expected: vec![
                TokenKind::I32,
                TokenKind::F32,
                TokenKind::Bool,
                TokenKind::Str,
                TokenKind::Identifier,
                TokenKind::LBracket,
            ],
            pos: self.current_pos(),
        }
        .wrap("base-type"))
    }

    fn parse_function_base_type(&mut self) -> ParseResult<BaseType> {
        self.accept(TokenKind::LBracket).map_err(|e| e.wrap("function-base-type"))?;
        self.accept(TokenKind::LParen).map_err(|e| e.wrap("function-base-type"))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            params.push(self.parse_param_type()?);
            while self.optional_accept(TokenKind::Comma).is_some() {
                params.push(self.parse_param_type()?);
            }
        }
        self.accept(TokenKind::RParen).map_err(|e| e.wrap("function-base-type"))?;

        let return_type = if self.optional_accept(TokenKind::Arrow).is_some() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        self.accept(TokenKind::RBracket).map_err(|e| e.wrap("function-base-type"))?;

        Ok(BaseType::Function { params, return_type })
    }

    /// `param-type ::= param-usage? type`
    pub(crate) fn parse_param_type(&mut self) -> ParseResult<ParamType> {
        let usage = self.parse_optional_param_usage();
        let ty = self.parse_type().map_err(|e| e.wrap("param-type"))?;
        Ok(ParamType { usage, ty })
    }

    /// `param-usage ::= "in" | "out" | "inout"`, defaulting to `In` when
    /// absent (the grammar marks it optional; an omitted usage reads most
    /// naturally as pass-by-read, matching the `in` keyword itself).
    pub(crate) fn parse_optional_param_usage(&mut self) -> ParamUsage {
        if self.optional_accept(TokenKind::In).is_some() {
            ParamUsage::In
        } else if self.optional_accept(TokenKind::Out).is_some() {
            ParamUsage::Out
        } else if self.optional_accept(TokenKind::InOut).is_some() {
            ParamUsage::InOut
        } else {
            ParamUsage::In
        }
    }
}

#[cfg(test)]
mod tests {
    use mylc_lex::Lexer;

    use super::Parser;
    use crate::types::{BaseType, PrimitiveType};

    fn parse_type_str(source: &str) -> crate::types::Type {
        let (tokens, _) = Lexer::tokenize(source);
        let mut parser = Parser::from_tokens(tokens);
        parser.parse_type().expect("should parse type")
    }

    #[test]
    fn primitive_type() {
        let ty = parse_type_str("i32");
        assert_eq!(ty.base, BaseType::Primitive(PrimitiveType::I32));
        assert!(ty.array_dims.is_empty());
    }

    #[test]
    fn array_type_dims_grow_rightward() {
        let ty = parse_type_str("i32[3][2]");
        assert_eq!(ty.array_dims, vec![3, 2]);
    }

    #[test]
    fn struct_type_is_named_by_identifier() {
        let ty = parse_type_str("vec2");
        match ty.base {
            BaseType::Struct(tok) => assert_eq!(tok.lexeme, "vec2"),
            other => panic!("expected struct base type, got {other:?}"),
        }
    }

    #[test]
    fn function_type_with_params_and_return() {
        let ty = parse_type_str("[(in i32, out f32) -> bool]");
        match ty.base {
            BaseType::Function { params, return_type } => {
                assert_eq!(params.len(), 2);
                assert!(return_type.is_some());
            },
            other => panic!("expected function base type, got {other:?}"),
        }
    }
}
