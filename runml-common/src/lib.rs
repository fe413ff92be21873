//! runml - Common Types and Utilities
//!
//! This crate contains the error type, diagnostics and source locations
//! shared by the translator and the driver.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter, Severity, IDENTIFIER_RULE};
pub use source_loc::SourceLocation;
