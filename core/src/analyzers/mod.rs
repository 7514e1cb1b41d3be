pub mod semantic;

pub use semantic::{Analyzer, TypeEnv, TypeError, analyze_semantic_rules};
