//! Abstract syntax tree and the recursive-descent parser that builds it.
mod cursor;
mod err;
mod expr;
mod kind;
mod node;
mod stmt;

use crate::error::ShowcErrorExt;
use crate::lexer::Token;
use crate::script::Script;

pub use cursor::is_reserved_name;
pub use err::SyntaxError;
pub use kind::{AstNodeKind, BinaryOperator, OperatorClass, Param, TypeName, UnaryOperator};
pub use node::AstNode;

/// Build the AST for a token sequence. The root is always a `Block`.
///
/// # Errors
///
/// Returns the first `SyntaxError`; there is no recovery.
pub fn parse_program(tokens: &[Token]) -> Result<AstNode, SyntaxError> {
    let mut parser = cursor::Parser::new(tokens);
    let ast = parser.parse_program()?;
    log::debug!("parser: {} top-level statement(s)", ast.statements().len());
    Ok(ast)
}

/// Tokenize and parse a script in one step.
pub fn generate_ast_from_source(script: &Script) -> Result<AstNode, Box<dyn ShowcErrorExt>> {
    let tokens = crate::lexer::tokenize(&script.content).map_err(crate::error::boxed)?;
    parse_program(&tokens).map_err(crate::error::boxed)
}
