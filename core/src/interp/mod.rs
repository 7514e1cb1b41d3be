//! Tree-walking interpreter over the AST.
mod err;
mod eval;
mod scope;
mod value;

use std::io::Write;

use crate::ast::AstNode;

pub use err::{RuntimeError, RuntimeErrorKind};
pub use eval::Interpreter;
pub use scope::{FunctionDef, RuntimeScope};
pub use value::Value;

/// Evaluate `node` in `scope`, writing `show` output to `out`.
pub fn evaluate(node: &AstNode, scope: &mut RuntimeScope, out: &mut dyn Write) -> Result<Value, RuntimeError> {
    Interpreter::new(scope, out).eval(node)
}
