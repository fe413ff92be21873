//! runml - ml to C11 translator
//!
//! This crate provides the translator core:
//! - Identifier registry: the shared namespace and its naming rule
//! - Classifier: recognizes the construct on one source line
//! - Parser: recovers the [`Program`] from the source text
//! - Codegen: emits declarations, definitions and the entry point as C

pub mod ast;
pub mod classifier;
pub mod codegen;
pub mod config;
pub mod identifier;
pub mod parser;
#[cfg(test)]
mod tests;

pub use ast::{
    FunctionDefinition, GlobalAssignment, Program, Statement, StatementKind, TopLevelItem,
};
pub use config::TranslatorConfig;
pub use identifier::{IdentifierError, IdentifierRegistry};
pub use parser::Parser;

use log::debug;
use runml_common::{CompilerError, Diagnostic};

/// Result of a successful translation
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Complete, independently compilable C11 source
    pub c_source: String,
    /// Warnings for lines that were dropped
    pub diagnostics: Vec<Diagnostic>,
}

/// High-level translator interface
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Parse ml source into the program model
    pub fn parse(&self, source: &str, filename: &str) -> Result<Program, CompilerError> {
        Ok(Parser::new(&self.config, filename).parse(source)?.program)
    }

    /// Translate ml source into C
    pub fn translate(&self, source: &str, filename: &str) -> Result<Translation, CompilerError> {
        let output = Parser::new(&self.config, filename).parse(source)?;
        debug!(
            "{}: {} of {} identifiers used, {}",
            filename,
            output.registry.len(),
            output.registry.capacity(),
            output.reporter.summary()
        );

        Ok(Translation {
            c_source: codegen::emit_program(&output.program),
            diagnostics: output.reporter.into_diagnostics(),
        })
    }
}

/// Translate ml source with the default configuration
pub fn translate(source: &str) -> Result<String, CompilerError> {
    Translator::default()
        .translate(source, "<input>")
        .map(|translation| translation.c_source)
}
