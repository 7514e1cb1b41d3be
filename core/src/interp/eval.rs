//! file: core/src/interp/eval.rs
//! description: tree-walking evaluation of statements and expressions.
//!
use std::io::Write;

use crate::ast::{AstNode, AstNodeKind, BinaryOperator, UnaryOperator};
use crate::location::Location;

use super::err::{RuntimeError, RuntimeErrorKind};
use super::scope::{FunctionDef, RuntimeScope};
use super::value::Value;

pub(crate) const MAX_CALL_DEPTH: usize = 200;

pub struct Interpreter<'a> {
    scope: &'a mut RuntimeScope,
    out: &'a mut dyn Write,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(scope: &'a mut RuntimeScope, out: &'a mut dyn Write) -> Self {
        Interpreter { scope, out, depth: 0 }
    }

    pub fn eval(&mut self, node: &AstNode) -> Result<Value, RuntimeError> {
        let location = node.get_location();
        match node.get_kind() {
            AstNodeKind::Number { value } => Ok(Value::Int(*value)),
            AstNodeKind::Float { value } => Ok(Value::Double(*value)),
            AstNodeKind::String { value } => Ok(Value::Str(value.clone())),
            AstNodeKind::Boolean { value } => Ok(Value::Bool(*value)),
            AstNodeKind::Variable { name } => self.scope.get(name).cloned().ok_or_else(|| {
                RuntimeError::new(RuntimeErrorKind::UndefinedVariable { name: name.clone() }, location)
            }),

            AstNodeKind::BinaryOp { op, left, right } => {
                // Both sides are always evaluated; `and`/`or` do not short-circuit.
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                binary(*op, lhs, rhs, location)
            }
            AstNodeKind::UnaryOp { op, operand } => {
                let value = self.eval(operand)?;
                match (op, value) {
                    (UnaryOperator::Neg, Value::Int(v)) => Ok(Value::Int(v.wrapping_neg())),
                    (UnaryOperator::Neg, Value::Double(v)) => Ok(Value::Double(-v)),
                    (UnaryOperator::Neg, other) => Err(unsupported("-", &other, None, location)),
                }
            }

            AstNodeKind::TypedDeclaration { name, value, .. } => {
                let value = self.eval(value)?;
                self.scope.set(name, value);
                Ok(Value::Void)
            }
            AstNodeKind::Show { expr } => {
                let value = self.eval(expr)?;
                if value.is_void() {
                    return Err(unsupported("show", &value, None, location));
                }
                writeln!(self.out, "{}", value).map_err(|e| {
                    RuntimeError::new(RuntimeErrorKind::Output { reason: e.to_string() }, location)
                })?;
                Ok(Value::Void)
            }
            AstNodeKind::If { condition, then_block, else_block } => {
                if self.condition("if", condition)? {
                    self.eval(then_block)?;
                } else if let Some(else_block) = else_block {
                    self.eval(else_block)?;
                }
                Ok(Value::Void)
            }
            AstNodeKind::While { condition, body } => {
                while self.condition("while", condition)? {
                    self.eval(body)?;
                }
                Ok(Value::Void)
            }
            AstNodeKind::FunctionDecl { name, params, body } => {
                let def = FunctionDef {
                    params: params.iter().map(|p| p.name.clone()).collect(),
                    body: (**body).clone(),
                };
                self.scope.define_function(name, def);
                Ok(Value::Void)
            }
            AstNodeKind::FunctionCall { name, args } => self.call(name, args, location),
            AstNodeKind::Block { statements } => {
                for statement in statements {
                    self.eval(statement)?;
                }
                Ok(Value::Void)
            }
        }
    }

    fn condition(&mut self, construct: &'static str, node: &AstNode) -> Result<bool, RuntimeError> {
        match self.eval(node)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::new(
                RuntimeErrorKind::NonBooleanCondition { construct, found: other.type_name().to_string() },
                node.get_location(),
            )),
        }
    }

    fn call(&mut self, name: &str, args: &[AstNode], location: Location) -> Result<Value, RuntimeError> {
        let def = self.scope.function(name).cloned().ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::UndefinedFunction { name: name.to_string() }, location)
        })?;
        if def.params.len() != args.len() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::ArityMismatch { name: name.to_string(), expected: def.params.len(), found: args.len() },
                location,
            ));
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::new(RuntimeErrorKind::CallDepthExceeded { limit: MAX_CALL_DEPTH }, location));
        }

        // Arguments are evaluated in the caller's frame.
        let mut frame = std::collections::HashMap::new();
        for (param, arg) in def.params.iter().zip(args) {
            frame.insert(param.clone(), self.eval(arg)?);
        }

        let caller = self.scope.swap_frame(frame);
        self.depth += 1;
        let result = self.eval(&def.body);
        self.depth -= 1;
        self.scope.swap_frame(caller);
        result.map(|_| Value::Void)
    }
}

fn unsupported(op: &str, left: &Value, right: Option<&Value>, location: Location) -> RuntimeError {
    RuntimeError::new(
        RuntimeErrorKind::UnsupportedOperation {
            op: op.to_string(),
            left: left.type_name().to_string(),
            right: right.map(|r| r.type_name().to_string()),
        },
        location,
    )
}

/// Apply a binary operator. Int and double mix by widening the int.
pub(crate) fn binary(op: BinaryOperator, lhs: Value, rhs: Value, location: Location) -> Result<Value, RuntimeError> {
    use Value::*;

    let fail = |lhs: &Value, rhs: &Value| unsupported(op.symbol(), lhs, Some(rhs), location);
    let division_by_zero = || RuntimeError::new(RuntimeErrorKind::DivisionByZero, location);

    let value = match (op, &lhs, &rhs) {
        (BinaryOperator::Add, Int(a), Int(b)) => Int(a.wrapping_add(*b)),
        (BinaryOperator::Sub, Int(a), Int(b)) => Int(a.wrapping_sub(*b)),
        (BinaryOperator::Mul, Int(a), Int(b)) => Int(a.wrapping_mul(*b)),
        (BinaryOperator::Div, Int(_), Int(0)) => return Err(division_by_zero()),
        (BinaryOperator::Div, Int(a), Int(b)) => Int(a.wrapping_div(*b)),

        (BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div, _, _) => {
            let (Some(a), Some(b)) = (as_double(&lhs), as_double(&rhs)) else {
                return Err(fail(&lhs, &rhs));
            };
            match op {
                BinaryOperator::Add => Double(a + b),
                BinaryOperator::Sub => Double(a - b),
                BinaryOperator::Mul => Double(a * b),
                _ if b == 0.0 => return Err(division_by_zero()),
                _ => Double(a / b),
            }
        }

        (BinaryOperator::Equal | BinaryOperator::NonEqual, _, _) => {
            let same = match (&lhs, &rhs) {
                (Int(a), Int(b)) => a == b,
                (Str(a), Str(b)) => a == b,
                (Bool(a), Bool(b)) => a == b,
                _ => match (as_double(&lhs), as_double(&rhs)) {
                    (Some(a), Some(b)) => a == b,
                    _ => return Err(fail(&lhs, &rhs)),
                },
            };
            Bool(if op == BinaryOperator::Equal { same } else { !same })
        }

        (BinaryOperator::More | BinaryOperator::Less, _, _) => {
            let ordering = match (&lhs, &rhs) {
                (Int(a), Int(b)) => a.partial_cmp(b),
                (Str(a), Str(b)) => a.partial_cmp(b),
                _ => match (as_double(&lhs), as_double(&rhs)) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => return Err(fail(&lhs, &rhs)),
                },
            };
            let holds = match ordering {
                Some(o) if op == BinaryOperator::More => o.is_gt(),
                Some(o) => o.is_lt(),
                None => false,
            };
            Bool(holds)
        }

        (BinaryOperator::And, Bool(a), Bool(b)) => Bool(*a && *b),
        (BinaryOperator::Or, Bool(a), Bool(b)) => Bool(*a || *b),
        (BinaryOperator::And | BinaryOperator::Or, _, _) => return Err(fail(&lhs, &rhs)),
    };
    Ok(value)
}

fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(f64::from(*v)),
        Value::Double(v) => Some(*v),
        Value::Str(_) | Value::Bool(_) | Value::Void => None,
    }
}
