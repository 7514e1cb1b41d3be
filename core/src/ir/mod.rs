pub mod lower;
pub mod module;
pub mod op;
pub mod opt;
pub mod tac;
pub mod value;

use crate::ast::AstNode;
use crate::config::CompileOptions;

pub use self::lower::{LoweringError, LoweringErrorKind};
pub use self::module::{Block, Declaration, Function, GlobalString, Module};
pub use self::op::{ArithOp, CmpPred, Inst, Terminator};
pub use self::tac::{Literal, Opcode, TacGenerator, TacInstr};
pub use self::value::{IrType, Operand};

/// Generate TAC for a whole program with a fresh generator.
pub fn generate_tac(ast: &AstNode, optimize: bool) -> Vec<TacInstr> {
    let mut generator = TacGenerator::new();
    generator.generate(ast);
    let instrs = generator.take_instructions();
    if optimize { opt::optimize(instrs) } else { instrs }
}

pub fn lower_tac_to_ir(instrs: &[TacInstr], options: &CompileOptions) -> Result<Module, LoweringError> {
    lower::lower(instrs, options)
}
