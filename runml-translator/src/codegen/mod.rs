//! C code generation
//!
//! The program is emitted in four sections, always in this order: the fixed
//! preamble, global declarations, function definitions and the `main` entry
//! point. Each section is produced by its own emitter over the parsed
//! [`Program`](crate::ast::Program).

pub mod declarations;
pub mod definitions;
pub mod entry_point;
pub mod print;

use crate::ast::Program;
use log::debug;

pub use declarations::emit_declarations;
pub use definitions::emit_definitions;
pub use entry_point::emit_entry_point;

/// Indentation used for every statement in the generated C
pub(crate) const INDENT: &str = "    ";

/// Global variables the entry point fills from the command line
pub const ARGUMENT_GLOBALS: [&str; 2] = ["arg0", "arg1"];

/// Includes, the argument globals and, when the program prints, the print helper
pub fn emit_preamble(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("#include <stdio.h>\n");
    out.push_str("#include <stdlib.h>\n");
    out.push_str("#include <math.h>\n\n");

    let globals: Vec<String> = ARGUMENT_GLOBALS
        .iter()
        .map(|name| format!("{} = 0.0", name))
        .collect();
    out.push_str(&format!("double {};\n\n", globals.join(", ")));

    if program.prints() {
        out.push_str(&print::emit_print_helper());
        out.push('\n');
    }
    out
}

/// Emit the complete C translation unit
pub fn emit_program(program: &Program) -> String {
    let sections = [
        emit_preamble(program),
        emit_declarations(program),
        emit_definitions(program),
        emit_entry_point(program),
    ];
    debug!(
        "emitted sections: preamble {}B, declarations {}B, definitions {}B, entry point {}B",
        sections[0].len(),
        sections[1].len(),
        sections[2].len(),
        sections[3].len()
    );
    sections.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Statement, StatementKind, TopLevelItem};
    use runml_common::SourceLocation;

    #[test]
    fn test_preamble_without_prints_has_no_helper() {
        let preamble = emit_preamble(&Program::default());
        assert_eq!(
            preamble,
            "#include <stdio.h>\n#include <stdlib.h>\n#include <math.h>\n\n\
             double arg0 = 0.0, arg1 = 0.0;\n\n"
        );
    }

    #[test]
    fn test_preamble_with_print_declares_helper() {
        let mut program = Program::default();
        program.top_level.push(TopLevelItem::Statement(Statement::new(
            StatementKind::Print { expr: "1".to_string() },
            SourceLocation::new_simple(1, 1),
        )));
        let preamble = emit_preamble(&program);
        assert!(preamble.contains("static void ML_print(double value)"));
    }
}
