//! `func-decl`, `struct-decl`, and their parameter/member lists.

use mylc_lex::{Token, TokenKind};

use crate::ast::{FuncDecl, Member, Param, StructDecl};
use crate::error::ParseResult;

use super::core::Parser;

impl Parser {
    /// `func-decl ::= "func" "=" "(" param-list? ")" ("->" type)? stmt`
    pub(crate) fn parse_func_decl(&mut self, should_export: bool, name: Token) -> ParseResult<FuncDecl> {
        self.accept(TokenKind::Func).map_err(|e| e.wrap("func-decl"))?;
        self.accept(TokenKind::Assign).map_err(|e| e.wrap("func-decl"))?;
        self.accept(TokenKind::LParen).map_err(|e| e.wrap("func-decl"))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            params.push(self.parse_param()?);
            while self.optional_accept(TokenKind::Comma).is_some() {
                params.push(self.parse_param()?);
            }
        }
        self.accept(TokenKind::RParen).map_err(|e| e.wrap("func-decl"))?;

        let return_type = if self.optional_accept(TokenKind::Arrow).is_some() {
            Some(self.parse_type().map_err(|e| e.wrap("func-decl"))?)
        } else {
            None
        };

        let body = self.parse_stmt().map_err(|e| e.wrap("func-decl"))?;

        Ok(FuncDecl { should_export, name, params, return_type, body })
    }

    /// `param ::= IDENT ":" param-usage? type`
    fn parse_param(&mut self) -> ParseResult<Param> {
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("param"))?;
        self.accept(TokenKind::Colon).map_err(|e| e.wrap("param"))?;
        let usage = self.parse_optional_param_usage();
        let ty = self.parse_type().map_err(|e| e.wrap("param"))?;
        Ok(Param { name, usage, ty })
    }

    /// `struct-decl ::= "struct" "=" "{" member-decl* "}"`
    pub(crate) fn parse_struct_decl(&mut self, should_export: bool, name: Token) -> ParseResult<StructDecl> {
        self.accept(TokenKind::Struct).map_err(|e| e.wrap("struct-decl"))?;
        self.accept(TokenKind::Assign).map_err(|e| e.wrap("struct-decl"))?;
        self.accept(TokenKind::LBrace).map_err(|e| e.wrap("struct-decl"))?;

        let mut members = Vec::new();
        while self.check(TokenKind::Identifier) {
            members.push(self.parse_member_decl()?);
        }

        self.accept(TokenKind::RBrace).map_err(|e| e.wrap("struct-decl"))?;

        Ok(StructDecl { should_export, name, members })
    }

    /// `member-decl ::= IDENT ":" type ";"`
    fn parse_member_decl(&mut self) -> ParseResult<Member> {
        let name = self.accept(TokenKind::Identifier).map_err(|e| e.wrap("member-decl"))?;
        self.accept(TokenKind::Colon).map_err(|e| e.wrap("member-decl"))?;
        let ty = self.parse_type().map_err(|e| e.wrap("member-decl"))?;
        self.accept(TokenKind::Semicolon).map_err(|e| e.wrap("member-decl"))?;
        Ok(Member { name, ty })
    }
}
