//! Program model recovered from ml source
//!
//! Expressions are kept as the source text they were written as. The
//! emitters copy them into C unchanged.

use runml_common::SourceLocation;

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Print { expr: String },
    Return { expr: String },
    Assign { name: String, expr: String },
    Call { expr: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub location: SourceLocation,
}

impl Statement {
    pub fn new(kind: StatementKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_print(&self) -> bool {
        matches!(self.kind, StatementKind::Print { .. })
    }
}

/// `name <- expr` at zero indentation
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAssignment {
    pub name: String,
    pub expr: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    pub location: SourceLocation,
}

impl FunctionDefinition {
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelItem {
    Global(GlobalAssignment),
    /// Only prints and calls appear at top level
    Statement(Statement),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Globals and top-level statements, interleaved in source order
    pub top_level: Vec<TopLevelItem>,
    pub functions: Vec<FunctionDefinition>,
}

impl Program {
    pub fn globals(&self) -> impl Iterator<Item = &GlobalAssignment> {
        self.top_level.iter().filter_map(|item| match item {
            TopLevelItem::Global(global) => Some(global),
            TopLevelItem::Statement(_) => None,
        })
    }

    pub fn top_level_statements(&self) -> impl Iterator<Item = &Statement> {
        self.top_level.iter().filter_map(|item| match item {
            TopLevelItem::Statement(stmt) => Some(stmt),
            TopLevelItem::Global(_) => None,
        })
    }

    /// Whether any print appears anywhere in the program
    pub fn prints(&self) -> bool {
        self.top_level_statements().any(Statement::is_print)
            || self
                .functions
                .iter()
                .any(|func| func.body.iter().any(Statement::is_print))
    }
}
