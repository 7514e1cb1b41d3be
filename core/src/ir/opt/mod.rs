//! file: core/src/ir/opt/mod.rs
//! description: TAC optimizer passes.
//!
//! Constant folding runs during generation (see `TacGenerator`); the
//! passes run here operate on a finished instruction sequence.
//!
pub mod const_fold;
pub mod dce;

use crate::ir::tac::TacInstr;

/// Run the post-generation passes over `instrs`.
pub fn optimize(instrs: Vec<TacInstr>) -> Vec<TacInstr> {
    let before = instrs.len();
    let optimized = dce::eliminate_dead_temporaries(instrs);
    log::debug!("optimize: {} -> {} instruction(s)", before, optimized.len());
    optimized
}
