//! file: core/src/ir/tac/instr.rs
//! description: three-address instruction and opcode definitions.
//!
//! A `TacInstr` holds at most two source operands and one destination.
//! Operands are textual: a literal in canonical form, a variable name, a
//! compiler temporary (`t1`, `t2`, ...) or a label (`L1`, ...).
//!
use serde::{Serialize, Serializer};
use std::fmt;

use crate::ast::BinaryOperator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Binary(BinaryOperator),
    Neg,
    Assign,
    Show,
    IfFalse,
    Goto,
    Label,
    Func,
    Formal,
    EndFunc,
    Call,
    /// Positional argument following a `Call`.
    Arg(usize),
}

impl Opcode {
    pub fn mnemonic(&self) -> String {
        match self {
            Opcode::Binary(op) => op.symbol().to_string(),
            Opcode::Neg => "neg".to_string(),
            Opcode::Assign => "=".to_string(),
            Opcode::Show => "show".to_string(),
            Opcode::IfFalse => "iffalse".to_string(),
            Opcode::Goto => "goto".to_string(),
            Opcode::Label => "label".to_string(),
            Opcode::Func => "func".to_string(),
            Opcode::Formal => "formal".to_string(),
            Opcode::EndFunc => "endfunc".to_string(),
            Opcode::Call => "call".to_string(),
            Opcode::Arg(i) => format!("arg{}", i),
        }
    }

    /// Instructions that dead-temporary elimination must never remove.
    pub fn has_effect(&self) -> bool {
        !matches!(self, Opcode::Binary(_) | Opcode::Neg | Opcode::Assign)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacInstr {
    pub op: Opcode,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
    pub result: Option<String>,
}

impl TacInstr {
    pub fn new(op: Opcode, arg1: Option<String>, arg2: Option<String>, result: Option<String>) -> Self {
        TacInstr { op, arg1, arg2, result }
    }

    pub fn binary(op: BinaryOperator, lhs: String, rhs: String, result: String) -> Self {
        Self::new(Opcode::Binary(op), Some(lhs), Some(rhs), Some(result))
    }

    pub fn neg(operand: String, result: String) -> Self {
        Self::new(Opcode::Neg, Some(operand), None, Some(result))
    }

    pub fn assign(value: String, target: String) -> Self {
        Self::new(Opcode::Assign, Some(value), None, Some(target))
    }

    pub fn show(value: String) -> Self {
        Self::new(Opcode::Show, Some(value), None, None)
    }

    pub fn if_false(cond: String, label: String) -> Self {
        Self::new(Opcode::IfFalse, Some(cond), None, Some(label))
    }

    pub fn goto(label: String) -> Self {
        Self::new(Opcode::Goto, None, None, Some(label))
    }

    pub fn label(label: String) -> Self {
        Self::new(Opcode::Label, None, None, Some(label))
    }

    pub fn arg1(&self) -> &str {
        self.arg1.as_deref().unwrap_or("_")
    }

    pub fn arg2(&self) -> &str {
        self.arg2.as_deref().unwrap_or("_")
    }

    pub fn result(&self) -> &str {
        self.result.as_deref().unwrap_or("_")
    }

    /// Operands this instruction reads.
    pub fn reads(&self) -> impl Iterator<Item = &str> {
        let named: [Option<&str>; 2] = match self.op {
            // arg1 of `formal` is a type name, of `call` a function name.
            Opcode::Formal | Opcode::Func | Opcode::EndFunc | Opcode::Call => [None, None],
            _ => [self.arg1.as_deref(), self.arg2.as_deref()],
        };
        named.into_iter().flatten()
    }
}

impl fmt::Display for TacInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Opcode::Binary(op) => write!(f, "{} = {} {} {}", self.result(), self.arg1(), op, self.arg2()),
            Opcode::Neg => write!(f, "{} = - {}", self.result(), self.arg1()),
            Opcode::Assign => write!(f, "{} = {}", self.result(), self.arg1()),
            Opcode::Show => write!(f, "show {}", self.arg1()),
            Opcode::IfFalse => write!(f, "iffalse {} goto {}", self.arg1(), self.result()),
            Opcode::Goto => write!(f, "goto {}", self.result()),
            Opcode::Label => write!(f, "{}:", self.result()),
            Opcode::Func => write!(f, "func {}", self.result()),
            Opcode::Formal => write!(f, "formal {} {}", self.arg1(), self.result()),
            Opcode::EndFunc => write!(f, "endfunc {}", self.result()),
            Opcode::Call => write!(
                f,
                "{} = call {} with {} args",
                self.result(),
                self.arg1(),
                self.arg2()
            ),
            Opcode::Arg(_) => write!(f, "param {}", self.arg1()),
        }
    }
}

/// Render a program one instruction per line.
pub fn dump(instrs: &[TacInstr]) -> String {
    let mut out = String::new();
    for instr in instrs {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

/// Compiler temporaries are `t` followed by one or more digits.
pub fn is_temporary(name: &str) -> bool {
    crate::ast::is_reserved_name(name)
}
