//! file: core/src/ast/expr.rs
//! description: expression parsing by precedence climbing.
//!
//! Levels, lowest to highest: `or`, `and`, comparison (`equal`, `non-equal`,
//! `more`, `less`), additive, multiplicative, unary minus, primary. Every
//! binary level is left-associative.
//!
use crate::lexer::TokenKind;

use super::cursor::Parser;
use super::err::SyntaxError;
use super::kind::{AstNodeKind, BinaryOperator, UnaryOperator};
use super::node::AstNode;

/// Binding power of each binary operator; higher binds tighter.
fn binary_precedence(kind: TokenKind) -> Option<(u8, BinaryOperator)> {
    let entry = match kind {
        TokenKind::Or => (1, BinaryOperator::Or),
        TokenKind::And => (2, BinaryOperator::And),
        TokenKind::Equal => (3, BinaryOperator::Equal),
        TokenKind::NonEqual => (3, BinaryOperator::NonEqual),
        TokenKind::More => (3, BinaryOperator::More),
        TokenKind::Less => (3, BinaryOperator::Less),
        TokenKind::Plus => (4, BinaryOperator::Add),
        TokenKind::Minus => (4, BinaryOperator::Sub),
        TokenKind::Star => (5, BinaryOperator::Mul),
        TokenKind::Slash => (5, BinaryOperator::Div),
        _ => return None,
    };
    Some(entry)
}

impl<'t> Parser<'t> {
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, SyntaxError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<AstNode, SyntaxError> {
        let mut left = self.parse_unary()?;

        while let Some((precedence, op)) = self.peek_kind().and_then(binary_precedence) {
            if precedence < min_precedence {
                break;
            }
            let op_token = self.advance().map(|t| t.location).unwrap_or_default();
            let right = self.parse_binary(precedence + 1)?;
            left = AstNode::new(
                AstNodeKind::BinaryOp { op, left: Box::new(left), right: Box::new(right) },
                op_token,
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<AstNode, SyntaxError> {
        if let Some(minus) = self.match_kind(TokenKind::Minus) {
            let operand = self.parse_unary()?;
            return Ok(AstNode::new(
                AstNodeKind::UnaryOp { op: UnaryOperator::Neg, operand: Box::new(operand) },
                minus.location,
            ));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<AstNode, SyntaxError> {
        let Some(token) = self.peek() else {
            return Err(self.error("expression"));
        };
        let location = token.location;

        let kind = match token.kind {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.require(TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::True => AstNodeKind::Boolean { value: true },
            TokenKind::False => AstNodeKind::Boolean { value: false },
            TokenKind::IntegerLit => match token.lexeme.parse::<i32>() {
                Ok(value) => AstNodeKind::Number { value },
                Err(_) => {
                    return Err(SyntaxError::expected(
                        "integer literal within the 32-bit range",
                        Some(token.lexeme.clone()),
                        location,
                    ));
                }
            },
            TokenKind::FloatLit => match token.lexeme.parse::<f64>() {
                Ok(value) => AstNodeKind::Float { value },
                Err(_) => return Err(self.error("float literal")),
            },
            TokenKind::StringLit => {
                let raw = token.lexeme.as_str();
                let value = raw
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                    .unwrap_or(raw)
                    .to_string();
                AstNodeKind::String { value }
            }
            TokenKind::Identifier => {
                if self.peek_nth_kind(1) == Some(TokenKind::LParen) {
                    return self.parse_call();
                }
                let name = self.parse_binding_name()?;
                return Ok(AstNode::new(AstNodeKind::Variable { name }, location));
            }
            _ => return Err(self.error("expression")),
        };

        self.advance();
        Ok(AstNode::new(kind, location))
    }

    /// `name(arg, arg, ...)`
    fn parse_call(&mut self) -> Result<AstNode, SyntaxError> {
        let name_token = self.require(TokenKind::Identifier)?;
        self.require(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.require(TokenKind::RParen)?;

        Ok(AstNode::new(
            AstNodeKind::FunctionCall { name: name_token.lexeme.clone(), args },
            name_token.location,
        ))
    }
}
