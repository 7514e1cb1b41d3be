use std::fmt;

/// Types of the low-level IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    I1,
    I32,
    Double,
    I8Ptr,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IrType::I1 => "i1",
            IrType::I32 => "i32",
            IrType::Double => "double",
            IrType::I8Ptr => "i8*",
        };
        write!(f, "{}", s)
    }
}

/// An instruction operand: an immediate, a virtual register or a pointer to
/// a global string constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i32),
    Double(f64),
    Bool(bool),
    Reg { name: String, ty: IrType },
    /// `len` counts the trailing NUL.
    GlobalStr { name: String, len: usize },
}

impl Operand {
    pub fn reg(name: impl Into<String>, ty: IrType) -> Self {
        Operand::Reg { name: name.into(), ty }
    }

    pub fn ty(&self) -> IrType {
        match self {
            Operand::Int(_) => IrType::I32,
            Operand::Double(_) => IrType::Double,
            Operand::Bool(_) => IrType::I1,
            Operand::Reg { ty, .. } => *ty,
            Operand::GlobalStr { .. } => IrType::I8Ptr,
        }
    }

    /// Operand followed by its type, as written in argument lists.
    pub fn typed(&self) -> String {
        format!("{} {}", self.ty(), self)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(v) => write!(f, "{}", v),
            // Hex bit pattern is exact for every double.
            Operand::Double(v) => write!(f, "0x{:016X}", v.to_bits()),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Reg { name, .. } => write!(f, "%{}", name),
            Operand::GlobalStr { name, len } => write!(
                f,
                "getelementptr inbounds ([{len} x i8], [{len} x i8]* @{name}, i32 0, i32 0)"
            ),
        }
    }
}
