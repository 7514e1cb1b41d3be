use crate::ast::AstNode;

use super::err::TypeError;
use super::kind::Type;
use super::stmt as stmt_mod;
use super::table::TypeEnv;

/// Owns a type environment across successive checks.
#[derive(Debug, Default)]
pub struct Analyzer {
    env: TypeEnv,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer { env: TypeEnv::new() }
    }

    /// Check `node`. On failure the environment is left as it was before the call.
    pub fn analyze(&mut self, node: &AstNode) -> Result<Type, TypeError> {
        let snapshot = self.env.clone();
        match stmt_mod::check_node(node, &mut self.env) {
            Ok(ty) => Ok(ty),
            Err(err) => {
                log::debug!("type check failed, restoring environment: {}", err);
                self.env = snapshot;
                Err(err)
            }
        }
    }

    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    pub fn into_env(self) -> TypeEnv {
        self.env
    }
}
