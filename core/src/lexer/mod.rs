//! file: core/src/lexer/mod.rs
//! description: source text to token sequence.
//!
//! The lexical rules live in `tokens.pest`; this module walks the pairs the
//! `pest`-generated `TokenGrammar` produces and turns each one into a
//! `Token`. Whitespace is skipped by the grammar itself.
//!
mod err;
mod token;

use pest::Parser;
use pest_derive::Parser;

use crate::location::Location;

pub use err::LexicalError;
pub use token::{Token, TokenKind};

#[derive(Parser)]
#[grammar = "lexer/tokens.pest"]
struct TokenGrammar;

/// Split `source` into tokens.
///
/// # Errors
///
/// Returns a `LexicalError` pointing at the first character no rule matches.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut pairs = TokenGrammar::parse(Rule::tokens, source).map_err(|e| {
        let offset = match e.location {
            pest::error::InputLocation::Pos(p) => p,
            pest::error::InputLocation::Span((p, _)) => p,
        };
        let unexpected = source[offset.min(source.len())..].chars().next().map(String::from).unwrap_or_default();
        LexicalError::new(unexpected, Location::from_offset(source, offset))
    })?;

    let mut tokens = Vec::new();
    let Some(root) = pairs.next() else {
        return Ok(tokens);
    };

    for pair in root.into_inner() {
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        let location = Location::new(span.start(), line, column);

        let kind = match pair.as_rule() {
            Rule::kw_int => TokenKind::Int,
            Rule::kw_double => TokenKind::Double,
            Rule::kw_string => TokenKind::String,
            Rule::kw_boolean => TokenKind::Boolean,
            Rule::kw_show => TokenKind::Show,
            Rule::kw_if => TokenKind::If,
            Rule::kw_else => TokenKind::Else,
            Rule::kw_while => TokenKind::While,
            Rule::kw_func => TokenKind::Func,
            Rule::kw_true => TokenKind::True,
            Rule::kw_false => TokenKind::False,
            Rule::kw_and => TokenKind::And,
            Rule::kw_or => TokenKind::Or,
            Rule::kw_equal => TokenKind::Equal,
            Rule::kw_non_equal => TokenKind::NonEqual,
            Rule::kw_more => TokenKind::More,
            Rule::kw_less => TokenKind::Less,
            Rule::identifier => TokenKind::Identifier,
            Rule::float_lit => TokenKind::FloatLit,
            Rule::integer_lit => TokenKind::IntegerLit,
            Rule::string_lit => TokenKind::StringLit,
            Rule::assign => TokenKind::Assign,
            Rule::plus => TokenKind::Plus,
            Rule::minus => TokenKind::Minus,
            Rule::star => TokenKind::Star,
            Rule::slash => TokenKind::Slash,
            Rule::lparen => TokenKind::LParen,
            Rule::rparen => TokenKind::RParen,
            Rule::lbrace => TokenKind::LBrace,
            Rule::rbrace => TokenKind::RBrace,
            Rule::semicolon => TokenKind::Semicolon,
            Rule::comma => TokenKind::Comma,
            Rule::unknown => return Err(LexicalError::new(pair.as_str(), location)),
            Rule::EOI => break,
            other => {
                log::warn!("lexer: skipping unexpected rule {:?} at {}", other, location);
                continue;
            }
        };

        tokens.push(Token::new(kind, pair.as_str(), location));
    }

    log::debug!("lexer: produced {} token(s)", tokens.len());
    Ok(tokens)
}
