//! file: core/src/ir/module.rs
//! description: block-structured low-level IR containers.
//!
//! A `Module` owns global string constants, external declarations and
//! functions. Each `Function` is a list of named `Block`s; a block keeps
//! its terminator in a dedicated slot so it can never hold two, and
//! refuses instructions once terminated.
//!
use std::collections::HashSet;
use std::fmt;

use super::lower::{LoweringError, LoweringErrorKind};
use super::op::{Inst, Terminator};
use super::value::{IrType, Operand};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub insts: Vec<Inst>,
    pub terminator: Option<Terminator>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block { name: name.into(), insts: Vec::new(), terminator: None }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }

    pub fn push(&mut self, inst: Inst) -> Result<(), LoweringError> {
        if self.is_terminated() {
            return Err(LoweringError::new(LoweringErrorKind::BlockTerminated {
                block: self.name.clone(),
                inst: inst.to_string(),
            }));
        }
        self.insts.push(inst);
        Ok(())
    }

    pub fn terminate(&mut self, terminator: Terminator) -> Result<(), LoweringError> {
        if self.is_terminated() {
            return Err(LoweringError::new(LoweringErrorKind::DoubleTerminator {
                block: self.name.clone(),
            }));
        }
        self.terminator = Some(terminator);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<(String, IrType)>,
    pub ret: IrType,
    pub blocks: Vec<Block>,
}

impl Function {
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn entry(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Every block terminated, every branch target present.
    pub fn verify(&self) -> Result<(), LoweringError> {
        let names: HashSet<&str> = self.blocks.iter().map(|b| b.name.as_str()).collect();
        for block in &self.blocks {
            let terminator = block.terminator.as_ref().ok_or_else(|| {
                LoweringError::new(LoweringErrorKind::UnterminatedBlock {
                    function: self.name.clone(),
                    block: block.name.clone(),
                })
            })?;
            for target in terminator.targets() {
                if !names.contains(target) {
                    return Err(LoweringError::new(LoweringErrorKind::UndefinedLabel {
                        function: self.name.clone(),
                        label: target.to_string(),
                    }));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|(name, ty)| format!("{} %arg.{}", ty, name))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "define {} @{}({}) {{", self.ret, self.name, params)?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", block.name)?;
            for inst in &block.insts {
                writeln!(f, "  {}", inst)?;
            }
            if let Some(terminator) = &block.terminator {
                writeln!(f, "  {}", terminator)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// A private, NUL-terminated string constant.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalString {
    pub name: String,
    pub value: String,
}

impl GlobalString {
    /// Byte length including the trailing NUL.
    pub fn byte_len(&self) -> usize {
        self.value.len() + 1
    }

    pub fn operand(&self) -> Operand {
        Operand::GlobalStr { name: self.name.clone(), len: self.byte_len() }
    }

    fn escaped(&self) -> String {
        let mut out = String::new();
        for byte in self.value.bytes() {
            if (byte.is_ascii_graphic() && byte != b'"' && byte != b'\\') || byte == b' ' {
                out.push(byte as char);
            } else {
                out.push_str(&format!("\\{:02X}", byte));
            }
        }
        out.push_str("\\00");
        out
    }
}

/// An external function the module calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub ret: IrType,
    pub params: Vec<IrType>,
    pub variadic: bool,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        if self.variadic {
            params.push("...".to_string());
        }
        write!(f, "declare {} @{}({})", self.ret, self.name, params.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub globals: Vec<GlobalString>,
    pub declarations: Vec<Declaration>,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module { name: name.into(), globals: Vec::new(), declarations: Vec::new(), functions: Vec::new() }
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn verify(&self) -> Result<(), LoweringError> {
        for function in &self.functions {
            function.verify()?;
        }
        Ok(())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        writeln!(f, "source_filename = \"{}\"", self.name)?;
        if !self.globals.is_empty() {
            writeln!(f)?;
        }
        for global in &self.globals {
            writeln!(
                f,
                "@{} = private unnamed_addr constant [{} x i8] c\"{}\"",
                global.name,
                global.byte_len(),
                global.escaped()
            )?;
        }
        if !self.declarations.is_empty() {
            writeln!(f)?;
        }
        for decl in &self.declarations {
            writeln!(f, "{}", decl)?;
        }
        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
