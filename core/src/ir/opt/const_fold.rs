//! file: core/src/ir/opt/const_fold.rs
//! description: constant folding over literal operands.
//!
//! Integer arithmetic wraps like a 32-bit signed cell. A folded zero
//! divisor yields `0`; checked programs never reach that case because the
//! type checker folds divisors with these same functions and rejects zero.
//!
use crate::ast::{BinaryOperator, OperatorClass};
use crate::ir::tac::Literal;
use crate::ir::tac::Literal::*;

/// Fold `lhs op rhs`. Returns `None` when the pair does not fold (mixed
/// literal kinds, an operator the kinds do not support, or a non-finite
/// double result); the caller then emits the instruction.
pub fn fold_binary(op: BinaryOperator, lhs: &Literal, rhs: &Literal) -> Option<Literal> {
    let folded = match op.class() {
        OperatorClass::Arithmetic => fold_arithmetic(op, lhs, rhs)?,
        OperatorClass::Equality => {
            let same = match (lhs, rhs) {
                (Int(a), Int(b)) => a == b,
                (Double(a), Double(b)) => a == b,
                (Str(a), Str(b)) => a == b,
                (Bool(a), Bool(b)) => a == b,
                _ => return None,
            };
            Bool(if op == BinaryOperator::Equal { same } else { !same })
        }
        OperatorClass::Ordering => {
            let ordering = match (lhs, rhs) {
                (Int(a), Int(b)) => a.partial_cmp(b)?,
                (Double(a), Double(b)) => a.partial_cmp(b)?,
                (Str(a), Str(b)) => a.partial_cmp(b)?,
                _ => return None,
            };
            Bool(if op == BinaryOperator::More { ordering.is_gt() } else { ordering.is_lt() })
        }
        OperatorClass::Logical => match (lhs, rhs) {
            (Bool(a), Bool(b)) => Bool(if op == BinaryOperator::And { *a && *b } else { *a || *b }),
            _ => return None,
        },
    };
    Some(folded)
}

fn fold_arithmetic(op: BinaryOperator, lhs: &Literal, rhs: &Literal) -> Option<Literal> {
    match (lhs, rhs) {
        (Int(a), Int(b)) => {
            let v = match op {
                BinaryOperator::Add => a.wrapping_add(*b),
                BinaryOperator::Sub => a.wrapping_sub(*b),
                BinaryOperator::Mul => a.wrapping_mul(*b),
                BinaryOperator::Div if *b == 0 => 0,
                BinaryOperator::Div => a.wrapping_div(*b),
                _ => return None,
            };
            Some(Int(v))
        }
        (Double(a), Double(b)) => {
            let v = match op {
                BinaryOperator::Add => a + b,
                BinaryOperator::Sub => a - b,
                BinaryOperator::Mul => a * b,
                BinaryOperator::Div if *b == 0.0 => 0.0,
                BinaryOperator::Div => a / b,
                _ => return None,
            };
            v.is_finite().then_some(Double(v))
        }
        _ => None,
    }
}

/// Fold unary minus over a numeric literal.
pub fn fold_neg(operand: &Literal) -> Option<Literal> {
    match operand {
        Int(v) => Some(Int(v.wrapping_neg())),
        Double(v) => Some(Double(-v)),
        _ => None,
    }
}
