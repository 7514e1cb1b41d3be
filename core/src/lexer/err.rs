use crate::error::{Level, ShowcErrorExt};
use crate::location::Location;

/// Input that no lexical rule matches.
#[derive(Debug, Clone)]
pub struct LexicalError {
    pub unexpected: String,
    pub location: Location,
}

impl LexicalError {
    pub fn new(unexpected: impl Into<String>, location: Location) -> Self {
        LexicalError { unexpected: unexpected.into(), location }
    }
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected character {:?} (at {})", self.unexpected, self.location)
    }
}

impl std::error::Error for LexicalError {}

impl ShowcErrorExt for LexicalError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        format!("unexpected character {:?}", self.unexpected)
    }

    fn issuer(&self) -> String {
        "showc.lexer".to_string()
    }

    fn location(&self) -> Option<Location> {
        Some(self.location)
    }
}
