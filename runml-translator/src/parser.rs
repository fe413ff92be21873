//! Program recovery
//!
//! One sweep over the source lines. The parser tracks whether it is inside a
//! function body, registers every introduced name and builds the [`Program`]
//! the emitters work from.

use crate::ast::{
    FunctionDefinition, GlobalAssignment, Program, Statement, StatementKind, TopLevelItem,
};
use crate::classifier::{classify, LineKind, SourceLine};
use crate::codegen::ARGUMENT_GLOBALS;
use crate::config::TranslatorConfig;
use crate::identifier::IdentifierRegistry;
use log::{debug, warn};
use runml_common::{CompilerError, ErrorReporter, SourceLocation};

/// C entry point, always emitted
const ENTRY_POINT: &str = "main";

/// Where the parser is relative to function bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Outside,
    InsideBody,
}

pub struct Parser<'a> {
    config: &'a TranslatorConfig,
    filename: &'a str,
    registry: IdentifierRegistry,
    reporter: ErrorReporter,
    state: BodyState,
    program: Program,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a TranslatorConfig, filename: &'a str) -> Self {
        Self {
            config,
            filename,
            registry: IdentifierRegistry::new(config.max_identifiers),
            reporter: ErrorReporter::new(),
            state: BodyState::Outside,
            program: Program::default(),
        }
    }

    /// Parse the whole source. Any returned error is fatal for the translation.
    pub fn parse(mut self, source: &str) -> Result<ParseOutput, CompilerError> {
        for (index, raw) in source.lines().enumerate() {
            let Some(line) = SourceLine::split(raw, self.filename, index as u32 + 1) else {
                continue;
            };
            self.parse_line(&line)?;
        }

        debug!(
            "parsed {}: {} top-level items, {} functions, {} identifiers",
            self.filename,
            self.program.top_level.len(),
            self.program.functions.len(),
            self.registry.len()
        );

        Ok(ParseOutput {
            program: self.program,
            registry: self.registry,
            reporter: self.reporter,
        })
    }

    fn parse_line(&mut self, line: &SourceLine<'_>) -> Result<(), CompilerError> {
        let kind = classify(line)?;

        // headers are only recognized at zero indentation
        if line.is_indented() {
            if self.state == BodyState::Outside {
                return self.unrecognized(line, "indented statement outside of a function");
            }
            return self.parse_body_line(kind, line);
        }

        let location = line.location.clone();
        match kind {
            LineKind::FunctionHeader { name, params } => {
                self.begin_function(name, params, location)
            }
            LineKind::Assignment { name, expr } => {
                check_not_reserved(&name, "global", &location)?;
                self.register(&name, &location)?;
                self.program
                    .top_level
                    .push(TopLevelItem::Global(GlobalAssignment { name, expr, location }));
                Ok(())
            }
            LineKind::Print { expr } => {
                self.push_top_level(StatementKind::Print { expr }, location)
            }
            LineKind::Call { expr } => self.push_top_level(StatementKind::Call { expr }, location),
            LineKind::Return { .. } => self.unrecognized(line, "return outside of a function"),
            LineKind::Unrecognized => self.unrecognized(line, "not a recognized statement"),
        }
    }

    fn begin_function(
        &mut self,
        name: String,
        params: Vec<String>,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        check_not_reserved(&name, "function", &location)?;
        self.register(&name, &location)?;

        for (index, param) in params.iter().enumerate() {
            if params[..index].contains(param) {
                return Err(CompilerError::syntax_error(
                    format!("duplicate parameter '{}' in function '{}'", param, name),
                    location,
                ));
            }
            self.register(param, &location)?;
        }

        if self.state == BodyState::InsideBody {
            debug!("closing previous function before '{}' at {}", name, location);
        }
        self.state = BodyState::InsideBody;
        self.program.functions.push(FunctionDefinition {
            name,
            parameters: params,
            body: Vec::new(),
            location,
        });
        Ok(())
    }

    fn parse_body_line(
        &mut self,
        kind: LineKind,
        line: &SourceLine<'_>,
    ) -> Result<(), CompilerError> {
        let statement = match kind {
            LineKind::Print { expr } => StatementKind::Print { expr },
            LineKind::Return { expr } => StatementKind::Return { expr },
            // locals are validated by the classifier but never registered
            LineKind::Assignment { name, expr } => StatementKind::Assign { name, expr },
            LineKind::Call { expr } => StatementKind::Call { expr },
            LineKind::Unrecognized | LineKind::FunctionHeader { .. } => {
                return self.unrecognized(line, "not a recognized statement");
            }
        };

        let function = self.program.functions.last_mut().ok_or_else(|| {
            CompilerError::from(format!("no open function for body line at {}", line.location))
        })?;
        function.body.push(Statement::new(statement, line.location.clone()));
        Ok(())
    }

    fn push_top_level(
        &mut self,
        kind: StatementKind,
        location: SourceLocation,
    ) -> Result<(), CompilerError> {
        self.program
            .top_level
            .push(TopLevelItem::Statement(Statement::new(kind, location)));
        Ok(())
    }

    fn register(&mut self, name: &str, location: &SourceLocation) -> Result<(), CompilerError> {
        self.registry
            .register(name)
            .map_err(|err| err.at(location.clone()))
    }

    fn unrecognized(&mut self, line: &SourceLine<'_>, reason: &str) -> Result<(), CompilerError> {
        if !self.config.allow_unrecognized {
            return Err(CompilerError::unrecognized(reason, line.content, line.location.clone()));
        }

        warn!("{}: dropping '{}': {}", line.location, line.content, reason);
        self.reporter.warning(
            format!("{}, line dropped: '{}'", reason, line.content),
            line.location.clone(),
        );
        Ok(())
    }
}

/// Globals and functions may not reuse a name the emitted program defines itself
fn check_not_reserved(
    name: &str,
    what: &str,
    location: &SourceLocation,
) -> Result<(), CompilerError> {
    if name == ENTRY_POINT || ARGUMENT_GLOBALS.contains(&name) {
        return Err(CompilerError::syntax_error(
            format!("'{}' is reserved and cannot be used as a {} name", name, what),
            location.clone(),
        ));
    }
    Ok(())
}

/// Everything the parser recovered from one source file
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub registry: IdentifierRegistry,
    pub reporter: ErrorReporter,
}
