use crate::ast::AstNode;

mod analyzer;
mod err;
mod expr;
mod kind;
mod stmt;
mod symbol;
mod table;

pub use analyzer::Analyzer;
pub use err::{TypeError, TypeErrorKind};
pub use kind::Type;
pub use symbol::FunctionSignature;
pub use table::TypeEnv;

/// Check `node` against `env`, binding declarations into it as they are seen.
///
/// Statements yield `void`. Stops at the first violation; on error `env` may
/// hold bindings made before the failure point.
pub fn check(node: &AstNode, env: &mut TypeEnv) -> Result<Type, TypeError> {
    stmt::check_node(node, env)
}

/// Check a whole program in a fresh environment.
pub fn analyze_semantic_rules(ast: &AstNode) -> Result<TypeEnv, TypeError> {
    let mut analyzer = Analyzer::new();
    analyzer.analyze(ast)?;
    Ok(analyzer.into_env())
}
