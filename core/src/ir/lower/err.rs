use crate::error::{Level, ShowcErrorExt};
use crate::ir::value::IrType;
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoweringErrorKind {
    /// A label is branched to but never defined.
    UndefinedLabel { function: String, label: String },
    DuplicateLabel { label: String },
    UnterminatedBlock { function: String, block: String },
    BlockTerminated { block: String, inst: String },
    DoubleTerminator { block: String },
    UndefinedValue { name: String },
    UndefinedFunction { name: String },
    SignatureMismatch { function: String, expected: Vec<IrType>, found: Vec<IrType> },
    MalformedInstruction { instr: String, reason: String },
}

/// An internal inconsistency between TAC generation and lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweringError {
    pub kind: LoweringErrorKind,
}

impl LoweringError {
    pub fn new(kind: LoweringErrorKind) -> Self {
        LoweringError { kind }
    }

    pub(crate) fn malformed(instr: impl ToString, reason: impl Into<String>) -> Self {
        Self::new(LoweringErrorKind::MalformedInstruction { instr: instr.to_string(), reason: reason.into() })
    }
}

fn type_list(types: &[IrType]) -> String {
    types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}

impl std::fmt::Display for LoweringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LoweringError {}

impl ShowcErrorExt for LoweringError {
    fn level(&self) -> Level {
        Level::Critical
    }

    fn message(&self) -> String {
        match &self.kind {
            LoweringErrorKind::UndefinedLabel { function, label } => {
                format!("label '{}' referenced in '{}' has no block", label, function)
            }
            LoweringErrorKind::DuplicateLabel { label } => format!("label '{}' defined twice", label),
            LoweringErrorKind::UnterminatedBlock { function, block } => {
                format!("block '{}' in '{}' has no terminator", block, function)
            }
            LoweringErrorKind::BlockTerminated { block, inst } => {
                format!("cannot append '{}' to terminated block '{}'", inst, block)
            }
            LoweringErrorKind::DoubleTerminator { block } => {
                format!("block '{}' already has a terminator", block)
            }
            LoweringErrorKind::UndefinedValue { name } => format!("temporary '{}' read before it is computed", name),
            LoweringErrorKind::UndefinedFunction { name } => format!("call to undeclared function '{}'", name),
            LoweringErrorKind::SignatureMismatch { function, expected, found } => format!(
                "function '{}' was specialized for ({}) but is called with ({})",
                function,
                type_list(expected),
                type_list(found)
            ),
            LoweringErrorKind::MalformedInstruction { instr, reason } => {
                format!("malformed instruction '{}': {}", instr, reason)
            }
        }
    }

    fn issuer(&self) -> String {
        "showc.ir.lower".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
