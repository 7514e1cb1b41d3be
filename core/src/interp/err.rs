use crate::error::{Level, ShowcErrorExt};
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable { name: String },
    UndefinedFunction { name: String },
    DivisionByZero,
    UnsupportedOperation { op: String, left: String, right: Option<String> },
    ArityMismatch { name: String, expected: usize, found: usize },
    NonBooleanCondition { construct: &'static str, found: String },
    CallDepthExceeded { limit: usize },
    Output { reason: String },
}

/// A failure while evaluating; fatal to the current unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub location: Location,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, location: Location) -> Self {
        RuntimeError { kind, location }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message(), self.location)
    }
}

impl std::error::Error for RuntimeError {}

impl ShowcErrorExt for RuntimeError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match &self.kind {
            RuntimeErrorKind::UndefinedVariable { name } => format!("variable '{}' has no value", name),
            RuntimeErrorKind::UndefinedFunction { name } => format!("function '{}' is not defined", name),
            RuntimeErrorKind::DivisionByZero => "division by zero".to_string(),
            RuntimeErrorKind::UnsupportedOperation { op, left, right: Some(right) } => {
                format!("unsupported operation: {} {} {}", left, op, right)
            }
            RuntimeErrorKind::UnsupportedOperation { op, left, right: None } => {
                format!("unsupported operation: {} {}", op, left)
            }
            RuntimeErrorKind::ArityMismatch { name, expected, found } => format!(
                "function '{}' expects {} argument(s), found {}",
                name, expected, found
            ),
            RuntimeErrorKind::NonBooleanCondition { construct, found } => {
                format!("condition of '{}' evaluated to {}", construct, found)
            }
            RuntimeErrorKind::CallDepthExceeded { limit } => {
                format!("call depth exceeded {} nested calls", limit)
            }
            RuntimeErrorKind::Output { reason } => format!("failed to write output: {}", reason),
        }
    }

    fn issuer(&self) -> String {
        "showc.interp".to_string()
    }

    fn location(&self) -> Option<Location> {
        Some(self.location)
    }
}
