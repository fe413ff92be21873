//! Error handling for the runml translator
//!
//! This module defines the translation error type and the diagnostic
//! reporting utilities shared by the translator and the driver.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Naming rule quoted by every identifier diagnostic
pub const IDENTIFIER_RULE: &str = "max 12 characters and no upper case characters";

/// Main error type for a translation; every variant aborts the translation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Invalid identifier '{name}' at {location} ({rule})", rule = IDENTIFIER_RULE)]
    InvalidIdentifier {
        name: String,
        location: SourceLocation,
    },

    #[error("Maximum number of identifiers ({limit}) exceeded at {location} while adding '{name}'")]
    IdentifierLimit {
        name: String,
        limit: usize,
        location: SourceLocation,
    },

    #[error("Syntax error at {location}: {message}")]
    SyntaxError {
        location: SourceLocation,
        message: String,
    },

    #[error("Unrecognized statement at {location}: {reason}: '{text}'")]
    UnrecognizedLine {
        location: SourceLocation,
        reason: String,
        text: String,
    },

    #[error("Internal translator error: {message}")]
    InternalError { message: String },
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{}", self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

impl From<&CompilerError> for Diagnostic {
    fn from(err: &CompilerError) -> Self {
        let diagnostic = Diagnostic::error(err.to_string(), err.location().cloned());
        match err {
            CompilerError::InvalidIdentifier { .. } => {
                diagnostic.with_note(format!("identifiers allow {}", IDENTIFIER_RULE))
            }
            CompilerError::IdentifierLimit { .. } => {
                diagnostic.with_note("raise the limit with --max-identifiers".to_string())
            }
            _ => diagnostic,
        }
    }
}

/// Collects the non-fatal diagnostics produced during a translation.
///
/// Anything worse than a warning aborts the translation as a [`CompilerError`].
#[derive(Debug)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::warning(message, Some(location)));
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Hand the collected diagnostics over to the caller
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.warning_count() {
            0 => "No warnings".to_string(),
            1 => "1 warning".to_string(),
            w => format!("{} warnings", w),
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerError {
    /// Create a syntax error
    pub fn syntax_error(message: String, location: SourceLocation) -> Self {
        CompilerError::SyntaxError { location, message }
    }

    /// Create an unrecognized-line error
    pub fn unrecognized(reason: &str, text: &str, location: SourceLocation) -> Self {
        CompilerError::UnrecognizedLine {
            location,
            reason: reason.to_string(),
            text: text.to_string(),
        }
    }

    /// Source location the error points at, if it has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CompilerError::InvalidIdentifier { location, .. }
            | CompilerError::IdentifierLimit { location, .. }
            | CompilerError::SyntaxError { location, .. }
            | CompilerError::UnrecognizedLine { location, .. } => Some(location),
            CompilerError::InternalError { .. } => None,
        }
    }
}

/// Convert from String (for simple error cases)
impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}
