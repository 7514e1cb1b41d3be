use std::collections::HashMap;

use super::kind::Type;
use super::symbol::FunctionSignature;

// A single frame: variable name -> declared type
#[derive(Debug, Clone, Default)]
struct Scope {
    vars: HashMap<String, Type>,
    // Set while a body is checked with `any` parameters; calls made from
    // here do not fix callee parameter types.
    provisional: bool,
}

/// Type environment carried from one compilation unit to the next.
///
/// Frames are isolated: a function body sees only its own frame, never the
/// caller's. `if`/`while` bodies do not open frames, so declarations inside
/// them land in the enclosing frame.
///
/// The first call that reaches a function with `any` parameters from a
/// concrete frame fixes those parameters to the argument types.
#[derive(Debug, Clone)]
pub struct TypeEnv {
    scopes: Vec<Scope>,
    functions: HashMap<String, FunctionSignature>,
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv { scopes: vec![Scope::default()], functions: HashMap::new() }
    }

    /// ------- Frame Helpers -------

    /// Push a fresh frame seeded with parameter bindings.
    pub fn enter_function(&mut self, params: impl IntoIterator<Item = (String, Type)>) {
        let vars: HashMap<String, Type> = params.into_iter().collect();
        let provisional = vars.values().any(Type::is_any);
        self.scopes.push(Scope { vars, provisional });
    }

    pub fn exit_function(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_provisional(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.provisional)
    }

    /// ------- Variable Helpers -------

    pub fn bind(&mut self, name: &str, ty: Type) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.vars.insert(name.to_string(), ty);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.scopes.last().and_then(|scope| scope.vars.get(name).copied())
    }

    /// ------- Function Helpers -------

    pub fn register_function(&mut self, signature: FunctionSignature) {
        self.functions.insert(signature.name.clone(), signature);
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn specialize_function(&mut self, name: &str, params: Vec<Type>) {
        if let Some(signature) = self.functions.get_mut(name) {
            log::debug!("type check: specialized '{}' as {:?}", name, params);
            signature.params = params;
        }
    }
}
