//! file: core/src/ir/lower/mod.rs
//! description: TAC -> block-structured IR lowering.
//!
//! `func`..`endfunc` regions are split out of the stream first and lowered
//! as functions of their own; everything else becomes `main`. A function
//! redefined later in the stream gets a fresh key, and calls are rewritten
//! to whichever definition was current where they appear.
//!
mod declare_builtins;
mod err;
mod function_builder;
mod lower_expr;
mod lower_stmt;
mod lowering_context;

use std::collections::HashMap;

use crate::config::CompileOptions;
use crate::ir::module::{Function, Module};
use crate::ir::op::Inst;
use crate::ir::tac::{Opcode, TacInstr};
use crate::ir::value::{IrType, Operand};

pub use err::{LoweringError, LoweringErrorKind};

use declare_builtins::SYSTEM;
use function_builder::FunctionBuilder;
use lowering_context::{Formal, LoweringContext, formal_type};

struct FunctionRegion {
    key: String,
    formals: Vec<Formal>,
    body: Vec<TacInstr>,
}

fn split_regions(instrs: &[TacInstr]) -> Result<(Vec<TacInstr>, Vec<FunctionRegion>), LoweringError> {
    let mut main = Vec::new();
    let mut open: Vec<FunctionRegion> = Vec::new();
    let mut done = Vec::new();
    let mut versions: HashMap<String, usize> = HashMap::new();
    let mut current: HashMap<String, String> = HashMap::new();

    for instr in instrs {
        match instr.op {
            Opcode::Func => {
                let name = instr.result().to_string();
                let version = versions.entry(name.clone()).or_insert(0);
                *version += 1;
                let key = if *version == 1 { name.clone() } else { format!("{}.{}", name, version) };
                current.insert(name, key.clone());
                open.push(FunctionRegion { key, formals: Vec::new(), body: Vec::new() });
            }
            Opcode::Formal => {
                let region = open
                    .last_mut()
                    .ok_or_else(|| LoweringError::malformed(instr, "parameter outside of a function"))?;
                region.formals.push(Formal { name: instr.result().to_string(), declared: formal_type(instr.arg1())? });
            }
            Opcode::EndFunc => {
                let region =
                    open.pop().ok_or_else(|| LoweringError::malformed(instr, "endfunc without func"))?;
                done.push(region);
            }
            _ => {
                let mut instr = instr.clone();
                if instr.op == Opcode::Call {
                    if let Some(key) = current.get(instr.arg1()) {
                        instr.arg1 = Some(key.clone());
                    }
                }
                match open.last_mut() {
                    Some(region) => region.body.push(instr),
                    None => main.push(instr),
                }
            }
        }
    }

    if let Some(region) = open.last() {
        return Err(LoweringError::malformed(format!("func {}", region.key), "missing endfunc"));
    }
    Ok((main, done))
}

/// Lower a TAC program into a verified module with a `main` entry point.
pub fn lower(instrs: &[TacInstr], options: &CompileOptions) -> Result<Module, LoweringError> {
    let (main_body, regions) = split_regions(instrs)?;
    log::debug!("lower: {} main instruction(s), {} function(s)", main_body.len(), regions.len());

    let mut ctx = LoweringContext::new();
    declare_builtins::declare_builtin_functions(&mut ctx);
    for region in &regions {
        ctx.declare_function(&region.key, region.formals.clone());
    }

    let mut main = FunctionBuilder::new("main", Vec::new());
    lower_stmt::lower_instructions(&mut ctx, &mut main, &main_body)?;
    if options.pause_on_exit {
        let command = ctx.intern_string("pause");
        let dest = main.alloc_reg();
        main.emit(Inst::Call {
            dest: Some(dest),
            ret: IrType::I32,
            callee: SYSTEM.to_string(),
            args: vec![command],
            variadic: false,
        })?;
    }
    let main = main.finish(Operand::Int(0))?;

    // Callers are declared after their callees, so lowering in reverse lets a
    // caller's call site specialize the callee before its body is fixed.
    let mut lowered: Vec<Function> = Vec::with_capacity(regions.len());
    for region in regions.iter().rev() {
        if ctx.is_unreached(&region.key) {
            log::debug!("lower: skipping fn.{}, no call fixes its parameter types", region.key);
            continue;
        }
        let params = ctx.fix_params(&region.key)?;
        let mut fb = FunctionBuilder::new(format!("fn.{}", region.key), params);
        lower_stmt::lower_instructions(&mut ctx, &mut fb, &region.body)?;
        lowered.push(fb.finish(Operand::Int(0))?);
    }
    lowered.reverse();

    let (globals, declarations) = ctx.into_globals();
    let mut module = Module::new(options.module_name.clone());
    module.globals = globals;
    module.declarations = declarations;
    module.functions.push(main);
    module.functions.extend(lowered);
    module.verify()?;
    Ok(module)
}
