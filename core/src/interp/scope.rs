use std::collections::HashMap;

use crate::ast::AstNode;

use super::value::Value;

/// A user function as recorded when its declaration executes.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<String>,
    pub body: AstNode,
}

/// Variable bindings of the active frame plus the function table.
///
/// The session carries one of these from unit to unit; a call swaps in a
/// fresh frame and puts the caller's back when the body finishes.
#[derive(Debug, Clone, Default)]
pub struct RuntimeScope {
    variables: HashMap<String, Value>,
    functions: HashMap<String, FunctionDef>,
}

impl RuntimeScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    pub fn define_function(&mut self, name: &str, def: FunctionDef) {
        self.functions.insert(name.to_string(), def);
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Replace the active frame, returning the previous one.
    pub(crate) fn swap_frame(&mut self, frame: HashMap<String, Value>) -> HashMap<String, Value> {
        std::mem::replace(&mut self.variables, frame)
    }
}
