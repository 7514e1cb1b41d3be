use crate::error::{Level, ShowcErrorExt};
use crate::lexer::TokenKind;
use crate::location::Location;

/// A required token (or construct) was absent. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub position: Location,
    /// Human-readable description of what the parser wanted.
    pub expected: String,
    /// Set when a specific token kind was required.
    pub expected_kind: Option<TokenKind>,
    /// Lexeme that was found instead, `None` at end of input.
    pub found: Option<String>,
}

impl SyntaxError {
    pub fn expected_token(kind: TokenKind, found: Option<String>, position: Location) -> Self {
        SyntaxError { position, expected: kind.to_string(), expected_kind: Some(kind), found }
    }

    pub fn expected(expected: impl Into<String>, found: Option<String>, position: Location) -> Self {
        SyntaxError { position, expected: expected.into(), expected_kind: None, found }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.message(), self.position)
    }
}

impl std::error::Error for SyntaxError {}

impl ShowcErrorExt for SyntaxError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match &self.found {
            Some(found) => format!("expected {}, found '{}'", self.expected, found),
            None => format!("expected {}, found end of input", self.expected),
        }
    }

    fn issuer(&self) -> String {
        "showc.ast.parser".to_string()
    }

    fn location(&self) -> Option<Location> {
        Some(self.position)
    }
}
