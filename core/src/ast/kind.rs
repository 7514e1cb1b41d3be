//! file: core/src/ast/kind.rs
//! description: AST node kind definitions and operator enums.
//!
//! Defines `AstNodeKind` along with `BinaryOperator`, `UnaryOperator` and
//! `TypeName`. The enum is closed: every later stage matches it exhaustively,
//! so adding a variant is a compile error until each stage handles it.
//!
use serde::Serialize;

use super::node::AstNode;

/// Represents binary operators in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Add,      // +
    Sub,      // -
    Mul,      // *
    Div,      // /
    Equal,    // equal
    NonEqual, // non-equal
    More,     // more
    Less,     // less
    And,      // and
    Or,       // or
}

/// Operator classes the type checker dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Equality,
    Ordering,
    Logical,
}

impl BinaryOperator {
    /// Source spelling, also used as the TAC opcode.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Equal => "equal",
            BinaryOperator::NonEqual => "non-equal",
            BinaryOperator::More => "more",
            BinaryOperator::Less => "less",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "equal" => BinaryOperator::Equal,
            "non-equal" => BinaryOperator::NonEqual,
            "more" => BinaryOperator::More,
            "less" => BinaryOperator::Less,
            "and" => BinaryOperator::And,
            "or" => BinaryOperator::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
                OperatorClass::Arithmetic
            }
            BinaryOperator::Equal | BinaryOperator::NonEqual => OperatorClass::Equality,
            BinaryOperator::More | BinaryOperator::Less => OperatorClass::Ordering,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Represents unary operators in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Neg, // -
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
        }
    }
}

/// Type keyword written in a declaration or parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeName {
    Int,
    Double,
    String,
    Boolean,
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TypeName::Int => "int",
            TypeName::Double => "double",
            TypeName::String => "string",
            TypeName::Boolean => "boolean",
        };
        write!(f, "{}", s)
    }
}

/// A function parameter; `ty` is `None` for untyped parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstNodeKind {
    Number { value: i32 },
    Float { value: f64 },
    String { value: String },
    Boolean { value: bool },
    Variable { name: String },

    BinaryOp { op: BinaryOperator, left: Box<AstNode>, right: Box<AstNode> },
    UnaryOp { op: UnaryOperator, operand: Box<AstNode> },

    TypedDeclaration { declared: TypeName, name: String, value: Box<AstNode> },
    Show { expr: Box<AstNode> },
    If { condition: Box<AstNode>, then_block: Box<AstNode>, else_block: Option<Box<AstNode>> },
    While { condition: Box<AstNode>, body: Box<AstNode> },

    FunctionDecl { name: String, params: Vec<Param>, body: Box<AstNode> },
    FunctionCall { name: String, args: Vec<AstNode> },

    Block { statements: Vec<AstNode> },
}

use std::fmt;

impl fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNodeKind::Number { .. } => write!(f, "Number"),
            AstNodeKind::Float { .. } => write!(f, "Float"),
            AstNodeKind::String { .. } => write!(f, "String"),
            AstNodeKind::Boolean { .. } => write!(f, "Boolean"),
            AstNodeKind::Variable { .. } => write!(f, "Variable"),
            AstNodeKind::BinaryOp { .. } => write!(f, "BinaryOp"),
            AstNodeKind::UnaryOp { .. } => write!(f, "UnaryOp"),
            AstNodeKind::TypedDeclaration { .. } => write!(f, "TypedDeclaration"),
            AstNodeKind::Show { .. } => write!(f, "Show"),
            AstNodeKind::If { .. } => write!(f, "If"),
            AstNodeKind::While { .. } => write!(f, "While"),
            AstNodeKind::FunctionDecl { .. } => write!(f, "FunctionDecl"),
            AstNodeKind::FunctionCall { .. } => write!(f, "FunctionCall"),
            AstNodeKind::Block { .. } => write!(f, "Block"),
        }
    }
}
