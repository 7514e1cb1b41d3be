use crate::ast::{AstNode, AstNodeKind, BinaryOperator, OperatorClass, UnaryOperator};
use crate::ir::opt::const_fold::{fold_binary, fold_neg};
use crate::ir::tac::Literal;
use crate::location::Location;

use super::err::{TypeError, TypeErrorKind};
use super::kind::Type;
use super::stmt::check_node;
use super::symbol::FunctionSignature;
use super::table::TypeEnv;

pub(crate) fn check_expression(node: &AstNode, env: &mut TypeEnv) -> Result<Type, TypeError> {
    let location = node.get_location();
    match node.get_kind() {
        AstNodeKind::Number { .. } => Ok(Type::Int),
        AstNodeKind::Float { .. } => Ok(Type::Double),
        AstNodeKind::String { .. } => Ok(Type::String),
        AstNodeKind::Boolean { .. } => Ok(Type::Boolean),
        AstNodeKind::Variable { name } => env.lookup(name).ok_or_else(|| {
            TypeError::new(TypeErrorKind::UndefinedVariable { name: name.clone() }, location)
        }),
        AstNodeKind::UnaryOp { op, operand } => {
            let ty = check_node(operand, env)?;
            match op {
                UnaryOperator::Neg if ty.is_numeric() || ty.is_any() => Ok(ty),
                UnaryOperator::Neg => Err(TypeError::new(
                    TypeErrorKind::InvalidOperand { op: "-".to_string(), operand: ty },
                    location,
                )),
            }
        }
        AstNodeKind::BinaryOp { op, left, right } => {
            let lhs = check_node(left, env)?;
            let rhs = check_node(right, env)?;
            let result = binary_result(*op, lhs, rhs, location)?;
            if *op == BinaryOperator::Div && is_constant_zero(right) {
                return Err(TypeError::new(TypeErrorKind::DivisionByZero, right.get_location()));
            }
            Ok(result)
        }
        AstNodeKind::FunctionCall { name, args } => check_call(name, args, env, location),
        // Statement kinds are dispatched by check_node before reaching here.
        _ => Ok(Type::Void),
    }
}

/// Result type of `lhs op rhs`, per operator class.
pub(crate) fn binary_result(
    op: BinaryOperator,
    lhs: Type,
    rhs: Type,
    location: Location,
) -> Result<Type, TypeError> {
    let invalid = || {
        TypeError::new(
            TypeErrorKind::InvalidOperands { op: op.symbol().to_string(), left: lhs, right: rhs },
            location,
        )
    };

    if !lhs.is_value_type() || !rhs.is_value_type() || !lhs.is_compatible_with(&rhs) {
        return Err(invalid());
    }

    match op.class() {
        OperatorClass::Equality => Ok(Type::Boolean),
        OperatorClass::Ordering => {
            if lhs == Type::Boolean || rhs == Type::Boolean {
                Err(invalid())
            } else {
                Ok(Type::Boolean)
            }
        }
        OperatorClass::Logical => {
            let ok = |t: Type| t == Type::Boolean || t.is_any();
            if ok(lhs) && ok(rhs) { Ok(Type::Boolean) } else { Err(invalid()) }
        }
        OperatorClass::Arithmetic => match (lhs, rhs) {
            (Type::Any, Type::Any) => Ok(Type::Any),
            (Type::Any, t) | (t, Type::Any) if t.is_numeric() => Ok(t),
            (l, r) if l == r && l.is_numeric() => Ok(l),
            _ => Err(invalid()),
        },
    }
}

fn is_constant_zero(node: &AstNode) -> bool {
    match constant_value(node) {
        Some(Literal::Int(v)) => v == 0,
        Some(Literal::Double(v)) => v == 0.0,
        _ => false,
    }
}

/// Value of an expression built from literals alone, folded the same way
/// TAC generation folds it.
fn constant_value(node: &AstNode) -> Option<Literal> {
    match node.get_kind() {
        AstNodeKind::Number { value } => Some(Literal::Int(*value)),
        AstNodeKind::Float { value } => Some(Literal::Double(*value)),
        AstNodeKind::String { value } => Some(Literal::Str(value.clone())),
        AstNodeKind::Boolean { value } => Some(Literal::Bool(*value)),
        AstNodeKind::UnaryOp { op: UnaryOperator::Neg, operand } => fold_neg(&constant_value(operand)?),
        AstNodeKind::BinaryOp { op, left, right } => {
            fold_binary(*op, &constant_value(left)?, &constant_value(right)?)
        }
        _ => None,
    }
}

fn check_call(
    name: &str,
    args: &[AstNode],
    env: &mut TypeEnv,
    location: Location,
) -> Result<Type, TypeError> {
    let signature = env.lookup_function(name).cloned().ok_or_else(|| {
        TypeError::new(TypeErrorKind::UndefinedFunction { name: name.to_string() }, location)
    })?;

    if signature.arity() != args.len() {
        return Err(TypeError::new(
            TypeErrorKind::ArityMismatch {
                name: name.to_string(),
                expected: signature.arity(),
                found: args.len(),
            },
            location,
        ));
    }

    let mut actual = Vec::with_capacity(args.len());
    for (index, (arg, expected)) in args.iter().zip(signature.params.iter()).enumerate() {
        let found = check_node(arg, env)?;
        if !found.is_value_type() || !expected.is_compatible_with(&found) {
            return Err(TypeError::new(
                TypeErrorKind::ArgumentMismatch {
                    name: name.to_string(),
                    index,
                    expected: *expected,
                    found,
                },
                arg.get_location(),
            ));
        }
        actual.push(if expected.is_any() { found } else { *expected });
    }

    if signature.is_generic() && !env.is_provisional() && !actual.iter().any(Type::is_any) {
        specialize(&signature, actual, env)?;
    }

    Ok(signature.returns)
}

/// Fix the `any` parameters of `signature` to `params` and check its body
/// again under them; later calls must agree with these types.
fn specialize(signature: &FunctionSignature, params: Vec<Type>, env: &mut TypeEnv) -> Result<(), TypeError> {
    let bindings = signature.bindings(&params);
    env.specialize_function(&signature.name, params);
    env.enter_function(bindings);
    let result = check_node(signature.body(), env);
    env.exit_function();
    result.map(|_| ())
}
