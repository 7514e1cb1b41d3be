//! file: core/src/ir/tac/generator.rs
//! description: AST -> three-address code generation.
//!
//! `TacGenerator::generate` returns the operand naming the value of a node
//! and appends instructions for everything that needs computing. Binary and
//! unary operations over literal operands fold on the spot and emit nothing.
//!
use crate::ast::{AstNode, AstNodeKind, Param, UnaryOperator};
use crate::ir::opt::const_fold;

use super::instr::{Opcode, TacInstr};
use super::literal::Literal;

/// Counters live as long as the generator so temporaries and labels stay
/// unique across every unit it is fed.
#[derive(Debug, Default, Clone)]
pub struct TacGenerator {
    instrs: Vec<TacInstr>,
    temp_counter: usize,
    label_counter: usize,
}

impl TacGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }

    fn new_label(&mut self) -> String {
        self.label_counter += 1;
        format!("L{}", self.label_counter)
    }

    fn emit(&mut self, instr: TacInstr) {
        log::trace!("tac: {}", instr);
        self.instrs.push(instr);
    }

    pub fn instructions(&self) -> &[TacInstr] {
        &self.instrs
    }

    /// Hand over everything generated so far; counters keep running.
    pub fn take_instructions(&mut self) -> Vec<TacInstr> {
        std::mem::take(&mut self.instrs)
    }

    /// Generate code for `node`, returning the operand that names its value.
    /// Statements return an empty operand.
    pub fn generate(&mut self, node: &AstNode) -> String {
        match node.get_kind() {
            AstNodeKind::Number { value } => Literal::Int(*value).to_string(),
            AstNodeKind::Float { value } => Literal::Double(*value).to_string(),
            AstNodeKind::String { value } => Literal::Str(value.clone()).to_string(),
            AstNodeKind::Boolean { value } => Literal::Bool(*value).to_string(),
            AstNodeKind::Variable { name } => name.clone(),

            AstNodeKind::BinaryOp { op, left, right } => {
                let lhs = self.generate(left);
                let rhs = self.generate(right);
                if let (Some(a), Some(b)) = (Literal::parse(&lhs), Literal::parse(&rhs)) {
                    if let Some(folded) = const_fold::fold_binary(*op, &a, &b) {
                        return folded.to_string();
                    }
                }
                let temp = self.new_temp();
                self.emit(TacInstr::binary(*op, lhs, rhs, temp.clone()));
                temp
            }
            AstNodeKind::UnaryOp { op, operand } => {
                let value = self.generate(operand);
                match op {
                    UnaryOperator::Neg => {
                        if let Some(folded) = Literal::parse(&value).and_then(|lit| const_fold::fold_neg(&lit)) {
                            return folded.to_string();
                        }
                        let temp = self.new_temp();
                        self.emit(TacInstr::neg(value, temp.clone()));
                        temp
                    }
                }
            }

            AstNodeKind::TypedDeclaration { name, value, .. } => {
                let value = self.generate(value);
                self.emit(TacInstr::assign(value, name.clone()));
                String::new()
            }
            AstNodeKind::Show { expr } => {
                let value = self.generate(expr);
                self.emit(TacInstr::show(value));
                String::new()
            }
            AstNodeKind::If { condition, then_block, else_block } => {
                let else_label = self.new_label();
                let end_label = self.new_label();
                let cond = self.generate(condition);
                self.emit(TacInstr::if_false(cond, else_label.clone()));
                self.generate(then_block);
                self.emit(TacInstr::goto(end_label.clone()));
                self.emit(TacInstr::label(else_label));
                if let Some(else_block) = else_block {
                    self.generate(else_block);
                }
                self.emit(TacInstr::label(end_label));
                String::new()
            }
            AstNodeKind::While { condition, body } => {
                let start_label = self.new_label();
                let end_label = self.new_label();
                self.emit(TacInstr::label(start_label.clone()));
                let cond = self.generate(condition);
                self.emit(TacInstr::if_false(cond, end_label.clone()));
                self.generate(body);
                self.emit(TacInstr::goto(start_label));
                self.emit(TacInstr::label(end_label));
                String::new()
            }
            AstNodeKind::FunctionDecl { name, params, body } => {
                self.generate_function(name, params, body);
                String::new()
            }
            AstNodeKind::FunctionCall { name, args } => {
                // Arguments are evaluated left to right before the call.
                let values: Vec<String> = args.iter().map(|arg| self.generate(arg)).collect();
                let temp = self.new_temp();
                self.emit(TacInstr::new(
                    Opcode::Call,
                    Some(name.clone()),
                    Some(values.len().to_string()),
                    Some(temp.clone()),
                ));
                for (i, value) in values.into_iter().enumerate() {
                    self.emit(TacInstr::new(Opcode::Arg(i), Some(value), None, None));
                }
                temp
            }
            AstNodeKind::Block { statements } => {
                for statement in statements {
                    self.generate(statement);
                }
                String::new()
            }
        }
    }

    fn generate_function(&mut self, name: &str, params: &[Param], body: &AstNode) {
        self.emit(TacInstr::new(Opcode::Func, None, None, Some(name.to_string())));
        for param in params {
            let ty = param.ty.map(|t| t.to_string()).unwrap_or_else(|| "any".to_string());
            self.emit(TacInstr::new(Opcode::Formal, Some(ty), None, Some(param.name.clone())));
        }
        self.generate(body);
        self.emit(TacInstr::new(Opcode::EndFunc, None, None, Some(name.to_string())));
    }
}
