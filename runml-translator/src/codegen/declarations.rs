//! Global variable declarations

use crate::ast::Program;

/// One `double` per top-level assignment, in source order
pub fn emit_declarations(program: &Program) -> String {
    let mut out = String::new();
    for global in program.globals() {
        out.push_str(&format!("double {} = {};\n", global.name, global.expr));
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
