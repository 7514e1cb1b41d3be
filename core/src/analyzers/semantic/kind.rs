use std::fmt;

use serde::Serialize;

use crate::ast::TypeName;

/// Static type of an expression or statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Int,
    Double,
    String,
    Boolean,
    /// Result of statements and of calls to user functions.
    Void,
    /// Untyped function parameter; compatible with every type.
    Any,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Double)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    /// Same type, or at least one side is `any`. No int/double coercion.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self == other || self.is_any() || other.is_any()
    }

    /// Types a value can have at run time.
    pub fn is_value_type(&self) -> bool {
        !matches!(self, Type::Void)
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Int => Type::Int,
            TypeName::Double => Type::Double,
            TypeName::String => Type::String,
            TypeName::Boolean => Type::Boolean,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::String => "string",
            Type::Boolean => "boolean",
            Type::Void => "void",
            Type::Any => "any",
        };
        write!(f, "{}", s)
    }
}
