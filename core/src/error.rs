use std::fmt;

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Common surface of every diagnostic the pipeline can produce.
///
/// Stages return `Box<dyn ShowcErrorExt>` so a driver can report lexical,
/// syntax, type, runtime and lowering failures through one code path.
pub trait ShowcErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn location(&self) -> Option<Location>;

    /// Type errors are the only category a driver is expected to report and
    /// continue past; everything else aborts the unit.
    fn is_recoverable(&self) -> bool {
        false
    }
}

impl fmt::Debug for dyn ShowcErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };

        write!(
            f,
            "SHOWC | {} | {} | {} | {}",
            self.level(),
            loc_str,
            self.issuer(),
            self.message()
        )
    }
}

impl fmt::Display for dyn ShowcErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Box any concrete diagnostic into the trait object used across stages.
pub(crate) fn boxed<E: ShowcErrorExt + 'static>(error: E) -> Box<dyn ShowcErrorExt> {
    Box::new(error)
}
