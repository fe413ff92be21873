//! The `main` entry point
//!
//! Loads the argument globals from the command line, then replays the
//! top-level prints and calls in source order.

use super::print::print_statement;
use super::{ARGUMENT_GLOBALS, INDENT};
use crate::ast::{Program, StatementKind};

pub fn emit_entry_point(program: &Program) -> String {
    let mut out = String::from("int main(int argc, char *argv[]) {\n");

    for (index, name) in ARGUMENT_GLOBALS.iter().enumerate() {
        out.push_str(&format!(
            "{i}if (argc > {n}) {{\n{i}{i}{name} = atof(argv[{n}]);\n{i}}}\n",
            i = INDENT,
            n = index + 1,
        ));
    }

    for stmt in program.top_level_statements() {
        let line = match &stmt.kind {
            StatementKind::Print { expr } => print_statement(expr),
            StatementKind::Call { expr } => format!("{};", expr),
            // the parser only keeps prints and calls at top level
            StatementKind::Return { .. } | StatementKind::Assign { .. } => continue,
        };
        out.push_str(INDENT);
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(INDENT);
    out.push_str("return 0;\n}\n");
    out
}
