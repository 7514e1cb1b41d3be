//! file: core/src/ir/lower/lowering_context.rs
//! description: module-wide state shared by every function being lowered.
//!
//! Holds the string constant pool and the user function signatures.
//! Untyped parameters are specialized on the first call that reaches them.
//! A function with untyped parameters that no call reaches is not lowered.
//!
use std::collections::HashMap;

use crate::ir::module::{Declaration, GlobalString};
use crate::ir::value::{IrType, Operand};

use super::err::{LoweringError, LoweringErrorKind};

#[derive(Debug, Clone)]
pub(crate) struct Formal {
    pub name: String,
    /// `None` for an untyped parameter.
    pub declared: Option<IrType>,
}

#[derive(Debug, Clone)]
pub(crate) struct Signature {
    pub ir_name: String,
    pub formals: Vec<Formal>,
    /// Concrete parameter types once specialized.
    pub params: Option<Vec<IrType>>,
}

#[derive(Debug, Default)]
pub(crate) struct LoweringContext {
    strings: Vec<GlobalString>,
    string_ids: HashMap<String, usize>,
    signatures: HashMap<String, Signature>,
    pub declarations: Vec<Declaration>,
}

impl LoweringContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer to a NUL-terminated global holding `value`, shared between uses.
    pub fn intern_string(&mut self, value: &str) -> Operand {
        if let Some(&idx) = self.string_ids.get(value) {
            return self.strings[idx].operand();
        }
        let global = GlobalString { name: format!(".str.{}", self.strings.len()), value: value.to_string() };
        let operand = global.operand();
        self.string_ids.insert(value.to_string(), self.strings.len());
        self.strings.push(global);
        operand
    }

    pub fn into_globals(self) -> (Vec<GlobalString>, Vec<Declaration>) {
        (self.strings, self.declarations)
    }

    pub fn declare_function(&mut self, key: &str, formals: Vec<Formal>) {
        self.signatures.insert(
            key.to_string(),
            Signature { ir_name: format!("fn.{}", key), formals, params: None },
        );
    }

    /// Whether `key` still has untyped parameters that no call specialized.
    pub fn is_unreached(&self, key: &str) -> bool {
        self.signatures
            .get(key)
            .is_some_and(|sig| sig.params.is_none() && sig.formals.iter().any(|f| f.declared.is_none()))
    }

    /// Parameter types for lowering the body of `key`.
    pub fn fix_params(&mut self, key: &str) -> Result<Vec<(String, IrType)>, LoweringError> {
        let sig = self.signatures.get_mut(key).ok_or_else(|| {
            LoweringError::new(LoweringErrorKind::UndefinedFunction { name: key.to_string() })
        })?;
        if sig.params.is_none() {
            sig.params = Some(default_params(&sig.formals));
        }
        let params = sig.params.clone().unwrap_or_default();
        Ok(sig.formals.iter().map(|f| f.name.clone()).zip(params).collect())
    }

    /// Check a call against `key`'s signature, specializing it when this is
    /// the first call. Returns the IR name and the parameter types.
    pub fn resolve_call(&mut self, key: &str, args: &[IrType]) -> Result<(String, Vec<IrType>), LoweringError> {
        let sig = self.signatures.get_mut(key).ok_or_else(|| {
            LoweringError::new(LoweringErrorKind::UndefinedFunction { name: key.to_string() })
        })?;

        if sig.params.is_none() && sig.formals.len() == args.len() {
            let specialized: Vec<IrType> = sig
                .formals
                .iter()
                .zip(args)
                .map(|(formal, arg)| formal.declared.unwrap_or(*arg))
                .collect();
            log::debug!("lower: specialized {} as {:?}", sig.ir_name, specialized);
            sig.params = Some(specialized);
        }
        let params = sig.params.clone().unwrap_or_else(|| default_params(&sig.formals));

        // An int argument may widen into a double parameter.
        let accepts = |param: &IrType, arg: &IrType| param == arg || (*param == IrType::Double && *arg == IrType::I32);
        if params.len() != args.len() || !params.iter().zip(args).all(|(p, a)| accepts(p, a)) {
            return Err(LoweringError::new(LoweringErrorKind::SignatureMismatch {
                function: key.to_string(),
                expected: params,
                found: args.to_vec(),
            }));
        }
        Ok((sig.ir_name.clone(), params))
    }
}

fn default_params(formals: &[Formal]) -> Vec<IrType> {
    formals.iter().map(|f| f.declared.unwrap_or(IrType::I32)).collect()
}

/// IR type for a type name carried by a `formal` instruction.
pub(crate) fn formal_type(name: &str) -> Result<Option<IrType>, LoweringError> {
    match name {
        "int" => Ok(Some(IrType::I32)),
        "double" => Ok(Some(IrType::Double)),
        "string" => Ok(Some(IrType::I8Ptr)),
        "boolean" => Ok(Some(IrType::I1)),
        "any" => Ok(None),
        other => Err(LoweringError::malformed(format!("formal {}", other), "unknown parameter type")),
    }
}
