use serde::Serialize;

use crate::location::Location;

use super::kind::AstNodeKind;

#[derive(Clone, PartialEq, Serialize)]
pub struct AstNode {
    pub kind: AstNodeKind,
    pub location: Location,
}

impl AstNode {
    pub fn new(kind: AstNodeKind, location: Location) -> Self {
        AstNode { kind, location }
    }

    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }

    pub fn get_location(&self) -> Location {
        self.location
    }

    /// Statements of a `Block` node, empty for anything else.
    pub fn statements(&self) -> &[AstNode] {
        match &self.kind {
            AstNodeKind::Block { statements } => statements,
            _ => &[],
        }
    }
}

use std::fmt;

impl AstNode {
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        fn fmt_indent(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
            for _ in 0..indent {
                write!(f, "  ")?;
            }
            Ok(())
        }

        fmt_indent(f, indent)?;
        match &self.kind {
            AstNodeKind::Number { value } => writeln!(f, "Number {}", value),
            AstNodeKind::Float { value } => writeln!(f, "Float {:?}", value),
            AstNodeKind::String { value } => writeln!(f, "String '{}'", value),
            AstNodeKind::Boolean { value } => writeln!(f, "Boolean {}", value),
            AstNodeKind::Variable { name } => writeln!(f, "Variable {}", name),
            AstNodeKind::BinaryOp { op, left, right } => {
                writeln!(f, "BinaryOp {}", op)?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            AstNodeKind::UnaryOp { op, operand } => {
                writeln!(f, "UnaryOp {}", op)?;
                operand.fmt_tree(f, indent + 1)
            }
            AstNodeKind::TypedDeclaration { declared, name, value } => {
                writeln!(f, "TypedDeclaration {} {}", declared, name)?;
                value.fmt_tree(f, indent + 1)
            }
            AstNodeKind::Show { expr } => {
                writeln!(f, "Show")?;
                expr.fmt_tree(f, indent + 1)
            }
            AstNodeKind::If { condition, then_block, else_block } => {
                writeln!(f, "If")?;
                condition.fmt_tree(f, indent + 1)?;
                then_block.fmt_tree(f, indent + 1)?;
                if let Some(else_block) = else_block {
                    else_block.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            AstNodeKind::While { condition, body } => {
                writeln!(f, "While")?;
                condition.fmt_tree(f, indent + 1)?;
                body.fmt_tree(f, indent + 1)
            }
            AstNodeKind::FunctionDecl { name, params, body } => {
                let params = params
                    .iter()
                    .map(|p| match p.ty {
                        Some(ty) => format!("{} {}", ty, p.name),
                        None => p.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "FunctionDecl {}({})", name, params)?;
                body.fmt_tree(f, indent + 1)
            }
            AstNodeKind::FunctionCall { name, args } => {
                writeln!(f, "FunctionCall {}", name)?;
                for arg in args {
                    arg.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            AstNodeKind::Block { statements } => {
                writeln!(f, "Block")?;
                for stmt in statements {
                    stmt.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to Display so both "{}" and "{:?}" are readable trees
        write!(f, "{}", self)
    }
}
