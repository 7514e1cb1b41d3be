use std::fmt;

use serde::Serialize;

use crate::location::Location;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // type keywords
    Int,
    Double,
    String,
    Boolean,

    // statement keywords
    Show,
    If,
    Else,
    While,
    Func,

    // operator keywords
    And,
    Or,
    Equal,
    NonEqual,
    More,
    Less,

    True,
    False,
    Identifier,
    IntegerLit,
    FloatLit,
    StringLit,

    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
}

impl TokenKind {
    /// Keywords that open a typed declaration.
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Double | TokenKind::String | TokenKind::Boolean)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Int => "'int'",
            TokenKind::Double => "'double'",
            TokenKind::String => "'string'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Show => "'show'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Func => "'func'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Equal => "'equal'",
            TokenKind::NonEqual => "'non-equal'",
            TokenKind::More => "'more'",
            TokenKind::Less => "'less'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLit => "integer literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::StringLit => "string literal",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
        };
        write!(f, "{}", s)
    }
}

/// A lexeme together with its category and where it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: Location) -> Self {
        Token { kind, lexeme: lexeme.into(), location }
    }

    pub fn offset(&self) -> usize {
        self.location.offset
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {}", self.kind, self.lexeme, self.location)
    }
}
