use crate::lexer::{Token, TokenKind};
use crate::location::Location;

use super::err::SyntaxError;

/// Read position over a borrowed token sequence with one token of look-ahead.
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    end: Location,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        // End-of-input position sits right after the last lexeme.
        let end = tokens
            .last()
            .map(|t| {
                let len = t.lexeme.len();
                Location::new(t.location.offset + len, t.location.line, t.location.column + t.lexeme.chars().count())
            })
            .unwrap_or_default();
        Parser { tokens, pos: 0, end }
    }

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> Option<&'t Token> {
        if self.check(kind) { self.advance() } else { None }
    }

    /// Consume a token of the given kind or fail with a `SyntaxError`.
    pub(crate) fn require(&mut self, kind: TokenKind) -> Result<&'t Token, SyntaxError> {
        match self.match_kind(kind) {
            Some(token) => Ok(token),
            None => Err(SyntaxError::expected_token(kind, self.found(), self.position())),
        }
    }

    /// Location of the next token, or end of input.
    pub(crate) fn position(&self) -> Location {
        self.peek().map(|t| t.location).unwrap_or(self.end)
    }

    pub(crate) fn found(&self) -> Option<String> {
        self.peek().map(|t| t.lexeme.clone())
    }

    pub(crate) fn error(&self, expected: &str) -> SyntaxError {
        SyntaxError::expected(expected, self.found(), self.position())
    }
}

/// Names of the form `t<digits>` belong to compiler temporaries.
pub fn is_reserved_name(name: &str) -> bool {
    name.len() > 1 && name.starts_with('t') && name[1..].chars().all(|c| c.is_ascii_digit())
}
