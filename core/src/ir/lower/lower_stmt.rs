//! file: core/src/ir/lower/lower_stmt.rs
//! description: lowering of a flat TAC stream into the blocks of one function.
//!
//! Labels open blocks (falling through with an explicit `br` when the
//! current block is still open), `goto` and `iffalse` terminate the current
//! block. A `call` consumes the `argN` instructions that follow it.
//!
use crate::ir::op::{Inst, Terminator};
use crate::ir::tac::{Opcode, TacInstr};
use crate::ir::value::{IrType, Operand};

use super::declare_builtins::PRINTF;
use super::err::LoweringError;
use super::function_builder::FunctionBuilder;
use super::lower_expr::{lower_binary, lower_condition, lower_neg, lower_operand, store_result};
use super::lowering_context::LoweringContext;

pub(crate) fn lower_instructions(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    instrs: &[TacInstr],
) -> Result<(), LoweringError> {
    let mut cursor = 0;
    while cursor < instrs.len() {
        let instr = &instrs[cursor];
        cursor += 1;
        match instr.op {
            Opcode::Binary(op) => lower_binary(ctx, fb, op, instr)?,
            Opcode::Neg => lower_neg(ctx, fb, instr)?,
            Opcode::Assign => {
                let value = lower_operand(ctx, fb, instr.arg1())?;
                store_result(fb, instr.result(), value)?;
            }
            Opcode::Show => lower_show(ctx, fb, instr)?,
            Opcode::Label => {
                let label = instr.result();
                let target = fb.define_label(label)?;
                if fb.has_open_block() {
                    fb.terminate(Terminator::Br { target: label.to_string() })?;
                }
                fb.switch_to(target);
            }
            Opcode::Goto => {
                let label = instr.result();
                fb.label_block(label);
                fb.terminate(Terminator::Br { target: label.to_string() })?;
                fb.detach();
            }
            Opcode::IfFalse => {
                let cond = lower_condition(ctx, fb, instr)?;
                let label = instr.result();
                fb.label_block(label);
                let cont = fb.continue_block();
                let if_true = fb.block_name(cont).to_string();
                fb.terminate(Terminator::CondBr { cond, if_true, if_false: label.to_string() })?;
                fb.switch_to(cont);
            }
            Opcode::Call => {
                let consumed = lower_call(ctx, fb, instr, &instrs[cursor..])?;
                cursor += consumed;
            }
            Opcode::Arg(_) => return Err(LoweringError::malformed(instr, "argument outside of a call")),
            Opcode::Func | Opcode::Formal | Opcode::EndFunc => {
                return Err(LoweringError::malformed(instr, "function marker inside a function body"));
            }
        }
    }
    Ok(())
}

fn lower_show(ctx: &mut LoweringContext, fb: &mut FunctionBuilder, instr: &TacInstr) -> Result<(), LoweringError> {
    let value = lower_operand(ctx, fb, instr.arg1())?;
    let (format, value) = match value.ty() {
        IrType::I32 => ("%d\n", value),
        IrType::Double => ("%f\n", value),
        IrType::I8Ptr => ("%s\n", value),
        IrType::I1 => {
            let if_true = ctx.intern_string("true");
            let if_false = ctx.intern_string("false");
            let dest = fb.alloc_reg();
            fb.emit(Inst::Select { dest: dest.clone(), cond: value, if_true, if_false })?;
            ("%s\n", Operand::reg(dest, IrType::I8Ptr))
        }
    };
    let format = ctx.intern_string(format);
    let dest = fb.alloc_reg();
    fb.emit(Inst::Call {
        dest: Some(dest),
        ret: IrType::I32,
        callee: PRINTF.to_string(),
        args: vec![format, value],
        variadic: true,
    })
}

/// Lower a call and its trailing arguments; returns how many `argN`
/// instructions were consumed.
fn lower_call(
    ctx: &mut LoweringContext,
    fb: &mut FunctionBuilder,
    instr: &TacInstr,
    rest: &[TacInstr],
) -> Result<usize, LoweringError> {
    let count: usize = instr
        .arg2()
        .parse()
        .map_err(|_| LoweringError::malformed(instr, "argument count is not a number"))?;
    if rest.len() < count {
        return Err(LoweringError::malformed(instr, "missing call arguments"));
    }

    let mut args = Vec::with_capacity(count);
    for (position, arg) in rest[..count].iter().enumerate() {
        if arg.op != Opcode::Arg(position) {
            return Err(LoweringError::malformed(arg, format!("expected arg{}", position)));
        }
        args.push(lower_operand(ctx, fb, arg.arg1())?);
    }

    let found: Vec<IrType> = args.iter().map(Operand::ty).collect();
    let (callee, params) = ctx.resolve_call(instr.arg1(), &found)?;

    let mut actuals = Vec::with_capacity(count);
    for (arg, param) in args.into_iter().zip(params) {
        if arg.ty() == IrType::I32 && param == IrType::Double {
            let dest = fb.alloc_reg();
            fb.emit(Inst::SiToFp { dest: dest.clone(), value: arg })?;
            actuals.push(Operand::reg(dest, IrType::Double));
        } else {
            actuals.push(arg);
        }
    }

    let dest = fb.alloc_reg();
    fb.emit(Inst::Call { dest: Some(dest.clone()), ret: IrType::I32, callee, args: actuals, variadic: false })?;
    store_result(fb, instr.result(), Operand::reg(dest, IrType::I32))?;
    Ok(count)
}
