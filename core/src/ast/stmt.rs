//! file: core/src/ast/stmt.rs
//! description: statement-level recursive descent.
//!
//! Statement dispatch looks at one token: a type keyword opens a typed
//! declaration, `show`/`if`/`while`/`func` open their constructs, anything
//! else is an expression statement. Every statement, including those inside
//! braces, is terminated by `;`, which the statement loops enforce.
//!
use crate::lexer::TokenKind;

use super::cursor::{Parser, is_reserved_name};
use super::err::SyntaxError;
use super::kind::{AstNodeKind, Param, TypeName};
use super::node::AstNode;

impl<'t> Parser<'t> {
    /// Parse the whole token sequence into a top-level `Block`.
    pub(crate) fn parse_program(&mut self) -> Result<AstNode, SyntaxError> {
        let location = self.position();
        let mut statements = Vec::new();
        while !self.at_end() {
            statements.push(self.parse_statement()?);
            self.require(TokenKind::Semicolon)?;
        }
        Ok(AstNode::new(AstNodeKind::Block { statements }, location))
    }

    fn parse_statement(&mut self) -> Result<AstNode, SyntaxError> {
        match self.peek_kind() {
            Some(kind) if kind.is_type_keyword() => self.parse_typed_declaration(),
            Some(TokenKind::Show) => self.parse_show(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::Func) => self.parse_function_decl(),
            Some(_) => self.parse_expression(),
            None => Err(self.error("statement")),
        }
    }

    /// `{ stmt; stmt; ... }`
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, SyntaxError> {
        let open = self.require(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.at_end() {
                return Err(SyntaxError::expected_token(TokenKind::RBrace, None, self.position()));
            }
            statements.push(self.parse_statement()?);
            self.require(TokenKind::Semicolon)?;
        }
        self.require(TokenKind::RBrace)?;
        Ok(AstNode::new(AstNodeKind::Block { statements }, open.location))
    }

    fn parse_type_name(&mut self) -> Result<TypeName, SyntaxError> {
        let ty = match self.peek_kind() {
            Some(TokenKind::Int) => TypeName::Int,
            Some(TokenKind::Double) => TypeName::Double,
            Some(TokenKind::String) => TypeName::String,
            Some(TokenKind::Boolean) => TypeName::Boolean,
            _ => return Err(self.error("type keyword")),
        };
        self.advance();
        Ok(ty)
    }

    /// Consume an identifier that names a variable or parameter.
    pub(crate) fn parse_binding_name(&mut self) -> Result<String, SyntaxError> {
        let token = self.require(TokenKind::Identifier)?;
        if is_reserved_name(&token.lexeme) {
            return Err(SyntaxError::expected(
                "a name not reserved for temporaries",
                Some(token.lexeme.clone()),
                token.location,
            ));
        }
        Ok(token.lexeme.clone())
    }

    fn parse_typed_declaration(&mut self) -> Result<AstNode, SyntaxError> {
        let location = self.position();
        let declared = self.parse_type_name()?;
        let name = self.parse_binding_name()?;
        self.require(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(AstNode::new(
            AstNodeKind::TypedDeclaration { declared, name, value: Box::new(value) },
            location,
        ))
    }

    fn parse_show(&mut self) -> Result<AstNode, SyntaxError> {
        let keyword = self.require(TokenKind::Show)?;
        let expr = self.parse_expression()?;
        Ok(AstNode::new(AstNodeKind::Show { expr: Box::new(expr) }, keyword.location))
    }

    fn parse_if(&mut self) -> Result<AstNode, SyntaxError> {
        let keyword = self.require(TokenKind::If)?;
        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_kind(TokenKind::Else).is_some() {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };
        Ok(AstNode::new(
            AstNodeKind::If {
                condition: Box::new(condition),
                then_block: Box::new(then_block),
                else_block,
            },
            keyword.location,
        ))
    }

    fn parse_while(&mut self) -> Result<AstNode, SyntaxError> {
        let keyword = self.require(TokenKind::While)?;
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(AstNode::new(
            AstNodeKind::While { condition: Box::new(condition), body: Box::new(body) },
            keyword.location,
        ))
    }

    /// `func name(p1, int p2) { ... }`
    fn parse_function_decl(&mut self) -> Result<AstNode, SyntaxError> {
        let keyword = self.require(TokenKind::Func)?;
        let name = self.require(TokenKind::Identifier)?.lexeme.clone();
        self.require(TokenKind::LParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ty = match self.peek_kind() {
                    Some(kind) if kind.is_type_keyword() => Some(self.parse_type_name()?),
                    _ => None,
                };
                let param_name = self.parse_binding_name()?;
                params.push(Param { name: param_name, ty });
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.require(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(AstNode::new(
            AstNodeKind::FunctionDecl { name, params, body: Box::new(body) },
            keyword.location,
        ))
    }
}
