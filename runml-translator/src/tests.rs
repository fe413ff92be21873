use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn translate_ok(source: &str) -> String {
    translate(source).unwrap()
}

#[test]
fn test_complete_translation() {
    let source =
        "# adds two numbers\nx <- 3\nfunction add a b\n\treturn a + b\nprint add(2,3)\nprint x\n";
    let expected = indoc! {r#"
        #include <stdio.h>
        #include <stdlib.h>
        #include <math.h>

        double arg0 = 0.0, arg1 = 0.0;

        static void ML_print(double value)
        {
            int integral = (value > -9.2e18 && value < 9.2e18)
                ? value == (double)(long long)value
                : !isnan(value);
            if (integral) {
                printf("%.0f\n", value == 0.0 ? 0.0 : value);
            } else {
                printf("%.6f\n", value);
            }
        }

        double x = 3;

        double add(double a, double b);

        double add(double a, double b) {
            return a + b;
            return 0.0;
        }

        int main(int argc, char *argv[]) {
            if (argc > 1) {
                arg0 = atof(argv[1]);
            }
            if (argc > 2) {
                arg1 = atof(argv[2]);
            }
            ML_print(add(2,3));
            ML_print(x);
            return 0;
        }
    "#};
    assert_eq!(translate_ok(source), expected);
}

#[test]
fn test_global_declarations() {
    let output = translate_ok("x <- 3\ny <- 3.5\n");
    assert!(output.contains("double x = 3;\ndouble y = 3.5;\n"));
    assert!(!output.contains("ML_print"));
}

#[test]
fn test_only_prints() {
    let output = translate_ok(indoc! {"
        print 1
        print 2.5
        print 1 + 2
    "});
    let main = output.split("int main").nth(1).unwrap();
    assert!(main.contains(
        "    ML_print(1);\n    ML_print(2.5);\n    ML_print(1 + 2);\n    return 0;\n}"
    ));
    assert!(!output.contains("double add"));
}

#[test]
fn test_function_without_parameters_and_call() {
    let output = translate_ok("function greet\n\tprint 42\ngreet()\n");
    assert!(output.contains("double greet(void);\n"));
    assert!(output.contains("double greet(void) {\n    ML_print(42);\n    return 0.0;\n}\n"));
    assert!(output.contains("    greet();\n    return 0;"));
}

#[test]
fn test_previous_function_closed_by_next_header() {
    let output = translate_ok(indoc! {"
        function first a
        \tprint a
        function second b
        \treturn b * 2
    "});
    assert!(output.contains(indoc! {"
        double first(double a) {
            ML_print(a);
            return 0.0;
        }

        double second(double b) {
            return b * 2;
            return 0.0;
        }
    "}));
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let with_noise = translate_ok("# header\n\nx <- 1   # the answer\n\n\n# done\n");
    let without = translate_ok("x <- 1\n");
    assert_eq!(with_noise, without);
}

#[test]
fn test_comparison_with_subtraction_is_not_assignment() {
    let output = translate_ok("a <- 1\nb <- 2\nprint a < b - 1\n");
    assert!(output.contains("ML_print(a < b - 1);"));
}

#[test]
fn test_translation_is_deterministic() {
    let source = indoc! {"
        rate <- 0.5
        function scale v
        \tt <- v * rate
        \treturn t
        function show v
        \tprint scale(v)
        show(4)
        print scale(3)
    "};
    assert_eq!(translate_ok(source), translate_ok(source));
}

#[test]
fn test_uppercase_identifier_aborts() {
    let err = translate("Value <- 1\n").unwrap_err();
    assert!(matches!(err, CompilerError::InvalidIdentifier { ref name, .. } if name == "Value"));
}

#[test]
fn test_identifier_capacity_aborts() {
    let source: String = (0..51).map(|i| format!("v{} <- {}\n", i, i)).collect();
    let err = translate(&source).unwrap_err();
    assert!(matches!(
        err,
        CompilerError::IdentifierLimit { limit: 50, ref name, .. } if name == "v50"
    ));

    let fits: String = (0..50).map(|i| format!("v{} <- {}\n", i, i)).collect();
    assert!(translate(&fits).is_ok());
}

#[test]
fn test_translator_reports_dropped_lines() {
    let translator = Translator::new(TranslatorConfig::default().with_allow_unrecognized(true));
    let translation = translator.translate("x <- 1\njunk\n", "demo.ml").unwrap();
    assert_eq!(translation.diagnostics.len(), 1);
    assert_eq!(translation.diagnostics[0].location.as_ref().map(|l| l.line), Some(2));
    assert!(translation.c_source.contains("double x = 1;"));
}

#[test]
fn test_parse_exposes_program() {
    let program = Translator::default()
        .parse("function f a\n\treturn a\nprint f(1)\n", "p.ml")
        .unwrap();
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].location.filename, "p.ml");
    assert_eq!(program.top_level_statements().count(), 1);
}
