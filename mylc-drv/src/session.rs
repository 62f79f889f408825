//! Owns one invocation's configuration and loaded sources, and drives the
//! lex -> parse -> scan -> typecheck/jumpcheck -> codegen pipeline stage
//! by stage, short-circuiting on the first error.

use std::path::PathBuf;

use mylc_gen::{CodeGenerator, FileSinkFactory};
use mylc_par::ast::{GlobalDecl, Module};
use mylc_par::Parser;
use mylc_sem::{GlobalSymbolScanner, JumpStmtChecker, ProgramEnvironment, TypeChecker};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DriverError, DriverResult};
use crate::source_map::SourceMap;

pub struct Session {
    config: Config,
    sources: SourceMap,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, sources: SourceMap::new() }
    }

    /// Converts into a plain `anyhow::Error` at this top-level boundary,
    /// so `main()` has one error type to report regardless of which
    /// stage raised it.
    pub fn compile(&mut self) -> anyhow::Result<()> {
        let modules = self.parse_inputs()?;

        info!(count = modules.len(), "scanning global symbols");
        let mut env = ProgramEnvironment::new();
        let mut scanner = GlobalSymbolScanner::new(&mut env);
        for (path, module) in &modules {
            scanner
                .scan(module)
                .map_err(|source| DriverError::Semantic { path: path.clone(), source })?;
        }

        for (path, module) in &modules {
            self.validate(&env, path, module)?;
        }

        let modules: Vec<Module> = modules.into_iter().map(|(_, module)| module).collect();
        info!(count = modules.len(), "generating C++");
        let mut generator =
            CodeGenerator::new(&env, self.config.output_dir.clone(), Box::new(FileSinkFactory));
        generator.generate(&modules)?;

        Ok(())
    }

    /// Loads and parses the input file named on the command line.
    /// Lexical and syntax errors abort here, before any cross-module
    /// symbol scanning begins.
    fn parse_inputs(&mut self) -> DriverResult<Vec<(PathBuf, Module)>> {
        let path = self.config.input.clone();
        let file_id = self.sources.load(&path)?;
        let source = self.sources.get(file_id).content.clone();

        debug!(path = %path.display(), "lexing and parsing");
        let (result, handler) = Parser::parse_source(&source);
        if let Some(diagnostic) = handler.first() {
            return Err(DriverError::Lex { path, diagnostic: diagnostic.clone() });
        }
        let module = result.map_err(|source| DriverError::Parse { path: path.clone(), source })?;

        Ok(vec![(path, module)])
    }

    fn validate(&self, env: &ProgramEnvironment, path: &PathBuf, module: &Module) -> DriverResult<()> {
        debug!(module = %module.name.lexeme, "type-checking");
        let mut type_checker = TypeChecker::new(env, module.name.lexeme.clone());
        type_checker
            .check_module(module)
            .map_err(|source| DriverError::Semantic { path: path.clone(), source })?;

        debug!(module = %module.name.lexeme, "checking jump statement usage");
        for decl in &module.decls {
            if let GlobalDecl::Func(func) = decl {
                JumpStmtChecker::new()
                    .check_stmt(&func.body)
                    .map_err(|source| DriverError::Semantic { path: path.clone(), source })?;
            }
        }

        Ok(())
    }
}
