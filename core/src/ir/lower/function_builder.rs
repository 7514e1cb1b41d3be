use std::collections::{HashMap, HashSet};

use crate::ir::module::{Block, Function};
use crate::ir::op::{Inst, Terminator};
use crate::ir::value::{IrType, Operand};

use super::err::{LoweringError, LoweringErrorKind};

/// Per-function lowering state: the label -> block table, variable storage,
/// temporaries held in registers and the block instructions currently go to.
///
/// `current` is `None` right after a `goto`; the next instruction that is not
/// a label opens an unreachable `dead_N` block instead of touching the
/// terminated one.
pub(crate) struct FunctionBuilder {
    name: String,
    params: Vec<(String, IrType)>,
    blocks: Vec<Block>,
    labels: HashMap<String, usize>,
    defined: HashSet<String>,
    current: Option<usize>,
    hoisted: usize,
    vars: HashMap<String, (String, IrType)>,
    temps: HashMap<String, Operand>,
    next_reg: usize,
    next_continue: usize,
    next_dead: usize,
    next_shadow: usize,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>, params: Vec<(String, IrType)>) -> Self {
        let mut builder = FunctionBuilder {
            name: name.into(),
            params: Vec::new(),
            blocks: vec![Block::new("entry")],
            labels: HashMap::new(),
            defined: HashSet::new(),
            current: Some(0),
            hoisted: 0,
            vars: HashMap::new(),
            temps: HashMap::new(),
            next_reg: 0,
            next_continue: 0,
            next_dead: 0,
            next_shadow: 0,
        };
        // Parameters get storage like any other variable so the body can
        // treat them uniformly.
        for (param, ty) in &params {
            let ptr = builder.var_storage(param, *ty);
            builder.blocks[0].insts.push(Inst::Store {
                value: Operand::reg(format!("arg.{}", param), *ty),
                ptr,
            });
        }
        builder.params = params;
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alloc_reg(&mut self) -> String {
        self.next_reg += 1;
        format!("r{}", self.next_reg)
    }

    /// ------- Block Helpers -------

    /// Block for `label`, created on first reference.
    pub fn label_block(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.labels.get(label) {
            return idx;
        }
        let idx = self.blocks.len();
        self.blocks.push(Block::new(label));
        self.labels.insert(label.to_string(), idx);
        idx
    }

    pub fn continue_block(&mut self) -> usize {
        self.next_continue += 1;
        self.push_block(format!("continue_{}", self.next_continue))
    }

    fn push_block(&mut self, name: String) -> usize {
        let idx = self.blocks.len();
        self.blocks.push(Block::new(name));
        idx
    }

    pub fn block_name(&self, idx: usize) -> &str {
        &self.blocks[idx].name
    }

    pub fn switch_to(&mut self, idx: usize) {
        self.current = Some(idx);
    }

    /// Forget the active block; used after an unconditional branch.
    pub fn detach(&mut self) {
        self.current = None;
    }

    pub fn has_open_block(&self) -> bool {
        self.current.is_some_and(|idx| !self.blocks[idx].is_terminated())
    }

    fn current_index(&mut self) -> usize {
        match self.current {
            Some(idx) => idx,
            None => {
                self.next_dead += 1;
                let idx = self.push_block(format!("dead_{}", self.next_dead));
                log::trace!("lower: opened unreachable block dead_{}", self.next_dead);
                self.current = Some(idx);
                idx
            }
        }
    }

    pub fn emit(&mut self, inst: Inst) -> Result<(), LoweringError> {
        log::trace!("lower: {}", inst);
        let idx = self.current_index();
        self.blocks[idx].push(inst)
    }

    pub fn terminate(&mut self, terminator: Terminator) -> Result<(), LoweringError> {
        log::trace!("lower: {}", terminator);
        let idx = self.current_index();
        self.blocks[idx].terminate(terminator)
    }

    pub fn define_label(&mut self, label: &str) -> Result<usize, LoweringError> {
        if !self.defined.insert(label.to_string()) {
            return Err(LoweringError::new(LoweringErrorKind::DuplicateLabel { label: label.to_string() }));
        }
        Ok(self.label_block(label))
    }

    /// ------- Value Helpers -------

    /// Storage for `name` holding values of type `ty`, allocated in the entry
    /// block on first use. Redeclaring a name with another type gets a fresh cell.
    pub fn var_storage(&mut self, name: &str, ty: IrType) -> String {
        if let Some((ptr, existing)) = self.vars.get(name) {
            if *existing == ty {
                return ptr.clone();
            }
        }
        let ptr = if self.vars.contains_key(name) {
            self.next_shadow += 1;
            format!("var.{}.{}", name, self.next_shadow)
        } else {
            format!("var.{}", name)
        };
        self.blocks[0].insts.insert(self.hoisted, Inst::Alloca { dest: ptr.clone(), ty });
        self.hoisted += 1;
        self.vars.insert(name.to_string(), (ptr.clone(), ty));
        ptr
    }

    pub fn lookup_var(&self, name: &str) -> Option<(String, IrType)> {
        self.vars.get(name).cloned()
    }

    pub fn bind_temp(&mut self, name: &str, value: Operand) {
        self.temps.insert(name.to_string(), value);
    }

    pub fn temp(&self, name: &str) -> Option<Operand> {
        self.temps.get(name).cloned()
    }

    /// Close the open block with `ret`, check labels and hand back the function.
    pub fn finish(mut self, ret_value: Operand) -> Result<Function, LoweringError> {
        if self.has_open_block() {
            self.terminate(Terminator::Ret { value: ret_value.clone() })?;
        }
        if let Some(label) = self.labels.keys().find(|label| !self.defined.contains(*label)) {
            return Err(LoweringError::new(LoweringErrorKind::UndefinedLabel {
                function: self.name.clone(),
                label: label.clone(),
            }));
        }
        let function = Function {
            name: self.name,
            params: self.params,
            ret: ret_value.ty(),
            blocks: self.blocks,
        };
        function.verify()?;
        Ok(function)
    }
}
