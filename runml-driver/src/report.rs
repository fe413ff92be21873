//! Diagnostic output on stderr

use crate::cli::MessageFormat;
use runml_common::{CompilerError, Diagnostic, Severity};

/// Human-readable form: `! Error: ...` / `! Warning: ...`
pub fn render_human(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
    };

    let mut out = format!("! {}: ", label);
    if let Some(location) = &diagnostic.location {
        out.push_str(&format!("{}: ", location));
    }
    out.push_str(&diagnostic.message);
    for note in &diagnostic.notes {
        out.push_str(&format!("\n@ {}", note));
    }
    out
}

pub fn report(diagnostic: &Diagnostic, format: MessageFormat) {
    match format {
        MessageFormat::Human => eprintln!("{}", render_human(diagnostic)),
        MessageFormat::Json => match serde_json::to_string(diagnostic) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => eprintln!("! Error: could not serialize diagnostic: {}", e),
        },
    }
}

pub fn report_all(diagnostics: &[Diagnostic], format: MessageFormat) {
    for diagnostic in diagnostics {
        report(diagnostic, format);
    }
}

/// Report the error that ended the invocation
pub fn report_error(err: &anyhow::Error, format: MessageFormat) {
    let mut diagnostic = match err.downcast_ref::<CompilerError>() {
        Some(compile_err) => Diagnostic::from(compile_err),
        None => Diagnostic::error(format!("{:#}", err), None),
    };
    if format == MessageFormat::Human {
        // the location is already part of the message
        diagnostic.location = None;
    }
    report(&diagnostic, format);
}
