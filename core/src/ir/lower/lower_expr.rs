//! file: core/src/ir/lower/lower_expr.rs
//! description: operand resolution and value-producing TAC instructions.
//!
use crate::ast::{BinaryOperator, OperatorClass};
use crate::ir::op::{ArithOp, CmpPred, Inst};
use crate::ir::tac::{Literal, TacInstr, is_temporary};
use crate::ir::value::{IrType, Operand};

use super::declare_builtins::STRCMP;
use super::err::{LoweringError, LoweringErrorKind};
use super::function_builder::FunctionBuilder;
use super::lowering_context::LoweringContext;

/// Resolve a TAC operand: literals become immediates (strings become
/// globals), temporaries come from registers, variables are loaded.
pub(crate) fn lower_operand(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    text: &str,
) -> Result<Operand, LoweringError> {
    if let Some(literal) = Literal::parse(text) {
        return Ok(match literal {
            Literal::Int(v) => Operand::Int(v),
            Literal::Double(v) => Operand::Double(v),
            Literal::Bool(b) => Operand::Bool(b),
            Literal::Str(s) => ctx.intern_string(&s),
        });
    }

    if is_temporary(text) {
        return fb
            .temp(text)
            .ok_or_else(|| LoweringError::new(LoweringErrorKind::UndefinedValue { name: text.to_string() }));
    }

    let (ptr, ty) = match fb.lookup_var(text) {
        Some(found) => found,
        None => {
            log::warn!("lower: '{}' read in '{}' before any store, using an i32 cell", text, fb.name());
            let ptr = fb.var_storage(text, IrType::I32);
            (ptr, IrType::I32)
        }
    };
    let dest = fb.alloc_reg();
    fb.emit(Inst::Load { dest: dest.clone(), ty, ptr })?;
    Ok(Operand::reg(dest, ty))
}

/// Bind a computed value to `target`: temporaries stay in registers, named
/// variables are stored into their cell.
pub(crate) fn store_result(fb: &mut FunctionBuilder, target: &str, value: Operand) -> Result<(), LoweringError> {
    if is_temporary(target) {
        fb.bind_temp(target, value);
        return Ok(());
    }
    let ptr = fb.var_storage(target, value.ty());
    fb.emit(Inst::Store { value, ptr })
}

fn widen(fb: &mut FunctionBuilder, value: Operand) -> Result<Operand, LoweringError> {
    let dest = fb.alloc_reg();
    fb.emit(Inst::SiToFp { dest: dest.clone(), value })?;
    Ok(Operand::reg(dest, IrType::Double))
}

/// Bring an int/double pair to a common type.
fn unify(fb: &mut FunctionBuilder, lhs: Operand, rhs: Operand) -> Result<(Operand, Operand), LoweringError> {
    match (lhs.ty(), rhs.ty()) {
        (IrType::I32, IrType::Double) => Ok((widen(fb, lhs)?, rhs)),
        (IrType::Double, IrType::I32) => {
            let rhs = widen(fb, rhs)?;
            Ok((lhs, rhs))
        }
        _ => Ok((lhs, rhs)),
    }
}

fn compute(fb: &mut FunctionBuilder, op: ArithOp, lhs: Operand, rhs: Operand) -> Result<Operand, LoweringError> {
    let ty = lhs.ty();
    let dest = fb.alloc_reg();
    fb.emit(Inst::Binary { dest: dest.clone(), op, lhs, rhs })?;
    Ok(Operand::reg(dest, ty))
}

fn compare(fb: &mut FunctionBuilder, pred: CmpPred, lhs: Operand, rhs: Operand) -> Result<Operand, LoweringError> {
    let dest = fb.alloc_reg();
    fb.emit(Inst::Cmp { dest: dest.clone(), pred, lhs, rhs })?;
    Ok(Operand::reg(dest, IrType::I1))
}

/// `strcmp(lhs, rhs)` as an i32 register.
fn strcmp(fb: &mut FunctionBuilder, lhs: Operand, rhs: Operand) -> Result<Operand, LoweringError> {
    let dest = fb.alloc_reg();
    fb.emit(Inst::Call {
        dest: Some(dest.clone()),
        ret: IrType::I32,
        callee: STRCMP.to_string(),
        args: vec![lhs, rhs],
        variadic: false,
    })?;
    Ok(Operand::reg(dest, IrType::I32))
}

pub(crate) fn lower_binary(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    op: BinaryOperator,
    instr: &TacInstr,
) -> Result<(), LoweringError> {
    let lhs = lower_operand(ctx, fb, instr.arg1())?;
    let rhs = lower_operand(ctx, fb, instr.arg2())?;
    let unsupported = |lhs: &Operand, rhs: &Operand| {
        LoweringError::malformed(instr, format!("'{}' on {} and {}", op, lhs.ty(), rhs.ty()))
    };

    let both_strings = lhs.ty() == IrType::I8Ptr && rhs.ty() == IrType::I8Ptr;
    let value = match op.class() {
        OperatorClass::Arithmetic => {
            let (lhs, rhs) = unify(fb, lhs, rhs)?;
            let arith = match (lhs.ty(), op) {
                (IrType::I32, BinaryOperator::Add) => ArithOp::Add,
                (IrType::I32, BinaryOperator::Sub) => ArithOp::Sub,
                (IrType::I32, BinaryOperator::Mul) => ArithOp::Mul,
                (IrType::I32, BinaryOperator::Div) => ArithOp::SDiv,
                (IrType::Double, BinaryOperator::Add) => ArithOp::FAdd,
                (IrType::Double, BinaryOperator::Sub) => ArithOp::FSub,
                (IrType::Double, BinaryOperator::Mul) => ArithOp::FMul,
                (IrType::Double, BinaryOperator::Div) => ArithOp::FDiv,
                _ => return Err(unsupported(&lhs, &rhs)),
            };
            compute(fb, arith, lhs, rhs)?
        }
        OperatorClass::Equality | OperatorClass::Ordering if both_strings => {
            let order = strcmp(fb, lhs, rhs)?;
            let pred = match op {
                BinaryOperator::Equal => CmpPred::Eq,
                BinaryOperator::NonEqual => CmpPred::Ne,
                BinaryOperator::More => CmpPred::Sgt,
                _ => CmpPred::Slt,
            };
            compare(fb, pred, order, Operand::Int(0))?
        }
        OperatorClass::Equality | OperatorClass::Ordering => {
            let (lhs, rhs) = unify(fb, lhs, rhs)?;
            if lhs.ty() != rhs.ty() {
                return Err(unsupported(&lhs, &rhs));
            }
            let pred = match (lhs.ty(), op) {
                (IrType::I32 | IrType::I1, BinaryOperator::Equal) => CmpPred::Eq,
                (IrType::I32 | IrType::I1, BinaryOperator::NonEqual) => CmpPred::Ne,
                (IrType::I32, BinaryOperator::More) => CmpPred::Sgt,
                (IrType::I32, BinaryOperator::Less) => CmpPred::Slt,
                (IrType::Double, BinaryOperator::Equal) => CmpPred::Oeq,
                (IrType::Double, BinaryOperator::NonEqual) => CmpPred::One,
                (IrType::Double, BinaryOperator::More) => CmpPred::Ogt,
                (IrType::Double, BinaryOperator::Less) => CmpPred::Olt,
                _ => return Err(unsupported(&lhs, &rhs)),
            };
            compare(fb, pred, lhs, rhs)?
        }
        OperatorClass::Logical => {
            if lhs.ty() != IrType::I1 || rhs.ty() != IrType::I1 {
                return Err(unsupported(&lhs, &rhs));
            }
            let logical = if op == BinaryOperator::And { ArithOp::And } else { ArithOp::Or };
            compute(fb, logical, lhs, rhs)?
        }
    };
    store_result(fb, instr.result(), value)
}

pub(crate) fn lower_neg(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    instr: &TacInstr,
) -> Result<(), LoweringError> {
    let operand = lower_operand(ctx, fb, instr.arg1())?;
    let value = match operand.ty() {
        IrType::I32 => compute(fb, ArithOp::Sub, Operand::Int(0), operand)?,
        IrType::Double => compute(fb, ArithOp::FSub, Operand::Double(0.0), operand)?,
        other => return Err(LoweringError::malformed(instr, format!("negation of {}", other))),
    };
    store_result(fb, instr.result(), value)
}

/// Condition operand as an `i1`; an `i32` (from a specialized untyped
/// parameter) is compared against zero.
pub(crate) fn lower_condition(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    instr: &TacInstr,
) -> Result<Operand, LoweringError> {
    let cond = lower_operand(ctx, fb, instr.arg1())?;
    match cond.ty() {
        IrType::I1 => Ok(cond),
        IrType::I32 => compare(fb, CmpPred::Ne, cond, Operand::Int(0)),
        other => Err(LoweringError::malformed(instr, format!("condition of type {}", other))),
    }
}
