//! file: core/src/session.rs
//! description: compilation session carrying state across units.
//!
//! A `Session` is what a REPL feeds one statement-terminated unit at a time.
//! It owns the type environment, the runtime scope and the TAC generator;
//! each is handed to the stages explicitly and only replaced once the
//! whole unit has succeeded.
//!
use crate::analyzers::semantic::{self, TypeEnv};
use crate::ast::{self, AstNode};
use crate::config::CompileOptions;
use crate::error::{ShowcErrorExt, boxed};
use crate::interp::{self, RuntimeScope};
use crate::ir::lower::LoweringError;
use crate::ir::module::Module;
use crate::ir::opt;
use crate::ir::tac::{TacGenerator, TacInstr};
use crate::lexer;

/// What one successfully compiled unit produced.
#[derive(Debug, Clone)]
pub struct UnitOutput {
    pub ast: AstNode,
    /// Text written by `show` while interpreting the unit.
    pub shown: String,
    /// TAC generated for this unit (optimized when enabled).
    pub tac: Vec<TacInstr>,
}

#[derive(Debug, Default)]
pub struct Session {
    options: CompileOptions,
    env: TypeEnv,
    scope: RuntimeScope,
    generator: TacGenerator,
    program: Vec<TacInstr>,
}

impl Session {
    pub fn new(options: CompileOptions) -> Self {
        Session {
            options,
            env: TypeEnv::new(),
            scope: RuntimeScope::new(),
            generator: TacGenerator::new(),
            program: Vec::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    pub fn scope(&self) -> &RuntimeScope {
        &self.scope
    }

    /// All TAC accepted so far, in unit order.
    pub fn program(&self) -> &[TacInstr] {
        &self.program
    }

    /// Parse and type-check `source` against a copy of the environment.
    fn front_end(&self, source: &str) -> Result<(AstNode, TypeEnv), Box<dyn ShowcErrorExt>> {
        let tokens = lexer::tokenize(source).map_err(boxed)?;
        let ast = ast::parse_program(&tokens).map_err(boxed)?;
        let mut env = self.env.clone();
        semantic::check(&ast, &mut env).map_err(boxed)?;
        Ok((ast, env))
    }

    fn generate(&mut self, ast: &AstNode) -> Vec<TacInstr> {
        self.generator.generate(ast);
        let tac = self.generator.take_instructions();
        let tac = if self.options.optimize { opt::optimize(tac) } else { tac };
        self.program.extend(tac.iter().cloned());
        tac
    }

    /// Run one unit through the whole pipeline: tokenize, parse, check,
    /// interpret, generate TAC. On any failure the session is unchanged.
    pub fn compile_unit(&mut self, source: &str) -> Result<UnitOutput, Box<dyn ShowcErrorExt>> {
        let (ast, env) = self.front_end(source)?;

        let mut scope = self.scope.clone();
        let mut shown = Vec::new();
        interp::evaluate(&ast, &mut scope, &mut shown).map_err(boxed)?;

        self.env = env;
        self.scope = scope;
        let tac = self.generate(&ast);
        log::debug!("session: unit accepted, {} TAC instruction(s)", tac.len());
        Ok(UnitOutput { ast, shown: String::from_utf8_lossy(&shown).into_owned(), tac })
    }

    /// Like `compile_unit` without interpreting; `shown` is always empty.
    pub fn translate_unit(&mut self, source: &str) -> Result<UnitOutput, Box<dyn ShowcErrorExt>> {
        let (ast, env) = self.front_end(source)?;
        self.env = env;
        let tac = self.generate(&ast);
        log::debug!("session: unit translated, {} TAC instruction(s)", tac.len());
        Ok(UnitOutput { ast, shown: String::new(), tac })
    }

    /// Parse and type-check only, committing declarations to the environment.
    pub fn check_unit(&mut self, source: &str) -> Result<AstNode, Box<dyn ShowcErrorExt>> {
        let (ast, env) = self.front_end(source)?;
        self.env = env;
        Ok(ast)
    }

    /// Lower every accepted unit into one module.
    pub fn lower(&self) -> Result<Module, LoweringError> {
        crate::ir::lower::lower(&self.program, &self.options)
    }
}
