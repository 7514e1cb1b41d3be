use crate::error::{Level, ShowcErrorExt};
use crate::location::Location;

use super::kind::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeErrorKind {
    UndefinedVariable { name: String },
    TypeMismatch { name: String, declared: Type, actual: Type },
    InvalidOperands { op: String, left: Type, right: Type },
    InvalidOperand { op: String, operand: Type },
    InvalidCondition { construct: &'static str, found: Type },
    UndefinedFunction { name: String },
    ArityMismatch { name: String, expected: usize, found: usize },
    ArgumentMismatch { name: String, index: usize, expected: Type, found: Type },
    DivisionByZero,
}

/// A static type violation. The checker stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub location: Location,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, location: Location) -> Self {
        TypeError { kind, location }
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message(), self.location)
    }
}

impl std::error::Error for TypeError {}

impl ShowcErrorExt for TypeError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match &self.kind {
            TypeErrorKind::UndefinedVariable { name } => format!("variable '{}' is not defined", name),
            TypeErrorKind::TypeMismatch { name, declared, actual } => format!(
                "variable '{}' is declared as {} but is assigned a value of type {}",
                name, declared, actual
            ),
            TypeErrorKind::InvalidOperands { op, left, right } => {
                format!("operator '{}' cannot be applied to {} and {}", op, left, right)
            }
            TypeErrorKind::InvalidOperand { op, operand } => {
                format!("'{}' cannot be applied to a value of type {}", op, operand)
            }
            TypeErrorKind::InvalidCondition { construct, found } => {
                format!("condition of '{}' must be boolean, found {}", construct, found)
            }
            TypeErrorKind::UndefinedFunction { name } => format!("function '{}' is not defined", name),
            TypeErrorKind::ArityMismatch { name, expected, found } => format!(
                "function '{}' expects {} argument(s), found {}",
                name, expected, found
            ),
            TypeErrorKind::ArgumentMismatch { name, index, expected, found } => format!(
                "argument {} of '{}' has type {}, expected {}",
                index + 1,
                name,
                found,
                expected
            ),
            TypeErrorKind::DivisionByZero => "divisor is a constant zero".to_string(),
        }
    }

    fn issuer(&self) -> String {
        "showc.analyzers.semantic".to_string()
    }

    fn location(&self) -> Option<Location> {
        Some(self.location)
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}
