//! Numeric print formatting
//!
//! A printed value is evaluated once. Integral values print without a
//! decimal point, everything else with six fractional digits.

/// Name of the generated helper. It contains an uppercase letter, which no
/// ml identifier may, so user functions can never shadow it.
pub const PRINT_HELPER: &str = "ML_print";

/// Definition of the print helper placed in the preamble.
///
/// The integral test calls no function an ml program could define: inside
/// the `long long` range it round-trips through a cast, outside it every
/// finite double is integral. `isnan` is a macro, so it cannot be shadowed.
/// `%.0f` keeps large integral values exact; negative zero is folded to zero.
pub fn emit_print_helper() -> String {
    let mut out = String::new();
    out.push_str(&format!("static void {}(double value)\n{{\n", PRINT_HELPER));
    out.push_str("    int integral = (value > -9.2e18 && value < 9.2e18)\n");
    out.push_str("        ? value == (double)(long long)value\n");
    out.push_str("        : !isnan(value);\n");
    out.push_str("    if (integral) {\n");
    out.push_str("        printf(\"%.0f\\n\", value == 0.0 ? 0.0 : value);\n");
    out.push_str("    } else {\n");
    out.push_str("        printf(\"%.6f\\n\", value);\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// Statement printing `expr`, without indentation
pub fn print_statement(expr: &str) -> String {
    format!("{}({});", PRINT_HELPER, expr)
}
