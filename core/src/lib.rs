pub mod analyzers;
pub mod ast;
pub mod config;
pub mod error;
pub mod interp;
pub mod ir;
pub mod lexer;
pub mod location;
pub mod script;
pub mod session;

pub use analyzers::semantic::{Type, TypeEnv, TypeError, TypeErrorKind, analyze_semantic_rules, check};
pub use ast::{AstNode, AstNodeKind, SyntaxError, generate_ast_from_source, parse_program};
pub use config::CompileOptions;
pub use error::{Level, ShowcErrorExt};
pub use interp::{RuntimeError, RuntimeErrorKind, RuntimeScope, Value, evaluate};
pub use ir::{LoweringError, Module, TacGenerator, TacInstr, generate_tac, lower_tac_to_ir};
pub use lexer::{LexicalError, Token, TokenKind, tokenize};
pub use location::Location;
pub use script::Script;
pub use session::{Session, UnitOutput};

pub fn generate_error_report(error: &dyn ShowcErrorExt) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("SHOWC | {} | {} | {}", level, location, message)
}

/// Everything a whole-file build produces.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub ast: AstNode,
    pub tac: Vec<TacInstr>,
    pub module: Module,
}

/// Compile a script to IR without interpreting it.
pub fn compile_script(script: &Script, options: &CompileOptions) -> Result<CompiledProgram, Box<dyn ShowcErrorExt>> {
    let mut session = Session::new(options.clone());
    let unit = session.translate_unit(&script.content)?;
    let module = session.lower().map_err(error::boxed)?;
    log::info!("compiled '{}': {} function(s)", script.name, module.functions.len());
    Ok(CompiledProgram { ast: unit.ast, tac: unit.tac, module })
}
