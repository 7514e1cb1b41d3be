use std::fmt;

use super::value::{IrType, Operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    SDiv,
    FAdd,
    FSub,
    FMul,
    FDiv,
    And,
    Or,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::SDiv => "sdiv",
            ArithOp::FAdd => "fadd",
            ArithOp::FSub => "fsub",
            ArithOp::FMul => "fmul",
            ArithOp::FDiv => "fdiv",
            ArithOp::And => "and",
            ArithOp::Or => "or",
        };
        write!(f, "{}", s)
    }
}

/// Comparison predicates. `O*` predicates compare doubles, the rest integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpPred {
    Eq,
    Ne,
    Sgt,
    Slt,
    Oeq,
    One,
    Ogt,
    Olt,
}

impl CmpPred {
    pub fn is_float(&self) -> bool {
        matches!(self, CmpPred::Oeq | CmpPred::One | CmpPred::Ogt | CmpPred::Olt)
    }
}

impl fmt::Display for CmpPred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpPred::Eq => "eq",
            CmpPred::Ne => "ne",
            CmpPred::Sgt => "sgt",
            CmpPred::Slt => "slt",
            CmpPred::Oeq => "oeq",
            CmpPred::One => "one",
            CmpPred::Ogt => "ogt",
            CmpPred::Olt => "olt",
        };
        write!(f, "{}", s)
    }
}

/// Non-terminating instructions.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    Alloca { dest: String, ty: IrType },
    Load { dest: String, ty: IrType, ptr: String },
    Store { value: Operand, ptr: String },
    Binary { dest: String, op: ArithOp, lhs: Operand, rhs: Operand },
    Cmp { dest: String, pred: CmpPred, lhs: Operand, rhs: Operand },
    SiToFp { dest: String, value: Operand },
    Select { dest: String, cond: Operand, if_true: Operand, if_false: Operand },
    Call { dest: Option<String>, ret: IrType, callee: String, args: Vec<Operand>, variadic: bool },
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Alloca { dest, ty } => write!(f, "%{} = alloca {}", dest, ty),
            Inst::Load { dest, ty, ptr } => write!(f, "%{} = load {}, {}* %{}", dest, ty, ty, ptr),
            Inst::Store { value, ptr } => write!(f, "store {}, {}* %{}", value.typed(), value.ty(), ptr),
            Inst::Binary { dest, op, lhs, rhs } => {
                write!(f, "%{} = {} {} {}, {}", dest, op, lhs.ty(), lhs, rhs)
            }
            Inst::Cmp { dest, pred, lhs, rhs } => {
                let cmp = if pred.is_float() { "fcmp" } else { "icmp" };
                write!(f, "%{} = {} {} {} {}, {}", dest, cmp, pred, lhs.ty(), lhs, rhs)
            }
            Inst::SiToFp { dest, value } => write!(f, "%{} = sitofp {} to double", dest, value.typed()),
            Inst::Select { dest, cond, if_true, if_false } => write!(
                f,
                "%{} = select {}, {}, {}",
                dest,
                cond.typed(),
                if_true.typed(),
                if_false.typed()
            ),
            Inst::Call { dest, ret, callee, args, variadic } => {
                if let Some(dest) = dest {
                    write!(f, "%{} = ", dest)?;
                }
                let args = args.iter().map(Operand::typed).collect::<Vec<_>>().join(", ");
                if *variadic {
                    write!(f, "call {} (i8*, ...) @{}({})", ret, callee, args)
                } else {
                    write!(f, "call {} @{}({})", ret, callee, args)
                }
            }
        }
    }
}

/// The single control-transfer instruction ending a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    Br { target: String },
    CondBr { cond: Operand, if_true: String, if_false: String },
    Ret { value: Operand },
}

impl Terminator {
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Terminator::Br { target } => vec![target.as_str()],
            Terminator::CondBr { if_true, if_false, .. } => vec![if_true.as_str(), if_false.as_str()],
            Terminator::Ret { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Br { target } => write!(f, "br label %{}", target),
            Terminator::CondBr { cond, if_true, if_false } => {
                write!(f, "br {}, label %{}, label %{}", cond.typed(), if_true, if_false)
            }
            Terminator::Ret { value } => write!(f, "ret {}", value.typed()),
        }
    }
}
