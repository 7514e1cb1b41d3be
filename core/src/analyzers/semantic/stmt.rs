use crate::ast::{AstNode, AstNodeKind, Param};

use super::err::{TypeError, TypeErrorKind};
use super::expr;
use super::kind::Type;
use super::symbol::FunctionSignature;
use super::table::TypeEnv;

pub(crate) fn check_node(node: &AstNode, env: &mut TypeEnv) -> Result<Type, TypeError> {
    match node.get_kind() {
        AstNodeKind::Block { statements } => {
            for statement in statements {
                check_node(statement, env)?;
            }
            Ok(Type::Void)
        }
        AstNodeKind::TypedDeclaration { declared, name, value } => {
            let declared = Type::from(*declared);
            // Bound first: the initializer may refer to the name being declared.
            env.bind(name, declared);
            let actual = check_node(value, env)?;
            if !declared.is_compatible_with(&actual) {
                return Err(TypeError::new(
                    TypeErrorKind::TypeMismatch { name: name.clone(), declared, actual },
                    node.get_location(),
                ));
            }
            Ok(Type::Void)
        }
        AstNodeKind::Show { expr } => {
            let ty = check_node(expr, env)?;
            if !ty.is_value_type() {
                return Err(TypeError::new(
                    TypeErrorKind::InvalidOperand { op: "show".to_string(), operand: ty },
                    expr.get_location(),
                ));
            }
            Ok(Type::Void)
        }
        AstNodeKind::If { condition, then_block, else_block } => {
            check_condition("if", condition, env)?;
            check_node(then_block, env)?;
            if let Some(else_block) = else_block {
                check_node(else_block, env)?;
            }
            Ok(Type::Void)
        }
        AstNodeKind::While { condition, body } => {
            check_condition("while", condition, env)?;
            check_node(body, env)?;
            Ok(Type::Void)
        }
        AstNodeKind::FunctionDecl { name, params, body } => {
            check_function_decl(name, params, body, env)?;
            Ok(Type::Void)
        }
        _ => expr::check_expression(node, env),
    }
}

fn check_condition(
    construct: &'static str,
    condition: &AstNode,
    env: &mut TypeEnv,
) -> Result<(), TypeError> {
    let found = check_node(condition, env)?;
    if found != Type::Boolean && !found.is_any() {
        return Err(TypeError::new(
            TypeErrorKind::InvalidCondition { construct, found },
            condition.get_location(),
        ));
    }
    Ok(())
}

fn check_function_decl(
    name: &str,
    params: &[Param],
    body: &AstNode,
    env: &mut TypeEnv,
) -> Result<(), TypeError> {
    let bindings: Vec<(String, Type)> = params
        .iter()
        .map(|p| (p.name.clone(), p.ty.map(Type::from).unwrap_or(Type::Any)))
        .collect();

    // Registered before the body so the function can call itself.
    env.register_function(FunctionSignature::new(name.to_string(), bindings.clone(), body.clone()));

    env.enter_function(bindings);
    let result = check_node(body, env);
    env.exit_function();
    result.map(|_| ())
}
