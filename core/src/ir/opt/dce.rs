//! file: core/src/ir/opt/dce.rs
//! description: dead-temporary elimination over TAC.
//!
//! Drops pure instructions whose result is a compiler temporary that no
//! instruction reads. Runs to a fixed point, so removing one dead
//! instruction can expose the temporaries feeding it.
//!
use std::collections::HashSet;

use crate::ir::tac::{TacInstr, is_temporary};

pub fn eliminate_dead_temporaries(instrs: Vec<TacInstr>) -> Vec<TacInstr> {
    let mut current = instrs;
    loop {
        let read: HashSet<String> = current
            .iter()
            .flat_map(|instr| instr.reads())
            .map(str::to_string)
            .collect();

        let before = current.len();
        current.retain(|instr| {
            if instr.op.has_effect() {
                return true;
            }
            match instr.result.as_deref() {
                Some(result) if is_temporary(result) => read.contains(result),
                _ => true,
            }
        });

        if current.len() == before {
            return current;
        }
        log::trace!("dce: removed {} instruction(s)", before - current.len());
    }
}
