//! Function definitions
//!
//! Every function gets a prototype first so bodies may call functions
//! defined further down the file. Each body ends with an implicit
//! `return 0.0;` for control falling off the end.

use super::print::print_statement;
use super::INDENT;
use crate::ast::{FunctionDefinition, Program, StatementKind};
use std::collections::HashSet;

pub fn emit_definitions(program: &Program) -> String {
    if program.functions.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for function in &program.functions {
        out.push_str(&format!("{};\n", signature(function)));
    }
    out.push('\n');

    for function in &program.functions {
        out.push_str(&emit_function(function));
    }
    out
}

/// `double name(double a, double b)`, or `double name(void)`
pub fn signature(function: &FunctionDefinition) -> String {
    let params = if function.parameters.is_empty() {
        "void".to_string()
    } else {
        function
            .parameters
            .iter()
            .map(|param| format!("double {}", param))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("double {}({})", function.name, params)
}

fn emit_function(function: &FunctionDefinition) -> String {
    let mut out = format!("{} {{\n", signature(function));
    // names already declared in this body
    let mut locals: HashSet<&str> = HashSet::new();

    for stmt in &function.body {
        let line = match &stmt.kind {
            StatementKind::Print { expr } => print_statement(expr),
            StatementKind::Return { expr } => format!("return {};", expr),
            StatementKind::Assign { name, expr } => {
                if function.has_parameter(name) || !locals.insert(name.as_str()) {
                    format!("{} = {};", name, expr)
                } else {
                    format!("double {} = {};", name, expr)
                }
            }
            StatementKind::Call { expr } => format!("{};", expr),
        };
        out.push_str(INDENT);
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(INDENT);
    out.push_str("return 0.0;\n}\n\n");
    out
}
