//! file: core/src/ir/lower/declare_builtins.rs
//! description: external C functions every emitted module declares.
//!
use crate::ir::module::Declaration;
use crate::ir::value::IrType;

use super::lowering_context::LoweringContext;

pub(crate) const PRINTF: &str = "printf";
pub(crate) const STRCMP: &str = "strcmp";
pub(crate) const SYSTEM: &str = "system";

pub(crate) fn declare_builtin_functions(ctx: &mut LoweringContext) {
    let builtins = [
        (PRINTF, vec![IrType::I8Ptr], true),
        (STRCMP, vec![IrType::I8Ptr, IrType::I8Ptr], false),
        (SYSTEM, vec![IrType::I8Ptr], false),
    ];
    for (name, params, variadic) in builtins {
        ctx.declarations.push(Declaration { name: name.to_string(), ret: IrType::I32, params, variadic });
    }
}
