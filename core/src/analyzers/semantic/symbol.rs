use crate::ast::AstNode;

use super::kind::Type;

/// Signature stored in the function table when a declaration is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    /// Declared parameter types; `any` until the first call specializes them.
    pub params: Vec<Type>,
    pub returns: Type,
    param_names: Vec<String>,
    body: AstNode,
}

impl FunctionSignature {
    pub fn new(name: String, params: Vec<(String, Type)>, body: AstNode) -> Self {
        let (param_names, params): (Vec<String>, Vec<Type>) = params.into_iter().unzip();
        // Functions have no return statement; every call is `void`.
        FunctionSignature { name, params, returns: Type::Void, param_names, body }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether some parameter still has the gradual type `any`.
    pub fn is_generic(&self) -> bool {
        self.params.iter().any(Type::is_any)
    }

    /// Parameter bindings for checking the body under `types`.
    pub fn bindings(&self, types: &[Type]) -> Vec<(String, Type)> {
        self.param_names.iter().cloned().zip(types.iter().copied()).collect()
    }

    pub fn body(&self) -> &AstNode {
        &self.body
    }
}
