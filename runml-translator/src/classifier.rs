//! Line classifier
//!
//! Turns one physical ml line into the construct it spells. Classification
//! is textual and context free; the parser decides whether a construct is
//! allowed where it appears.

use crate::identifier::IdentifierRegistry;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use runml_common::{CompilerError, SourceLocation};

/// Two-character assignment marker
pub const ASSIGNMENT_MARKER: &str = "<-";

static FUNCTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^function(?:\s+(?P<rest>.*))?$").expect("valid header pattern"));

static KEYWORD_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<keyword>print|return)(?:\s+(?P<expr>.*))?$").expect("valid keyword pattern")
});

/// A comment-stripped, non-blank line of ml source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine<'a> {
    /// Number of leading tab characters
    pub indent: usize,
    /// Text after the indentation, trimmed
    pub content: &'a str,
    pub location: SourceLocation,
}

impl<'a> SourceLine<'a> {
    /// Strip the comment from `raw` and split off its indentation.
    /// Returns `None` for lines that are blank once the comment is gone.
    pub fn split(raw: &'a str, filename: &str, line: u32) -> Option<Self> {
        let code = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let indent = code.chars().take_while(|&c| c == '\t').count();
        let content = code[indent..].trim();
        if content.is_empty() {
            return None;
        }

        // tabs are one byte each, so the first content column follows directly
        let leading = code[indent..].len() - code[indent..].trim_start().len();
        let column = (indent + leading + 1) as u32;

        Some(Self {
            indent,
            content,
            location: SourceLocation::new(filename, line, column),
        })
    }

    pub fn is_indented(&self) -> bool {
        self.indent > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    FunctionHeader { name: String, params: Vec<String> },
    Assignment { name: String, expr: String },
    Print { expr: String },
    Return { expr: String },
    Call { expr: String },
    Unrecognized,
}

/// Classify one line. Rules apply in priority order: function header,
/// assignment, print, return, call.
pub fn classify(line: &SourceLine<'_>) -> Result<LineKind, CompilerError> {
    let content = line.content;

    let header = FUNCTION_HEADER
        .captures(content)
        .filter(|_| !line.is_indented());
    let kind = if let Some(header) = header {
        parse_header(header.name("rest").map(|m| m.as_str()), &line.location)?
    } else if let Some((lhs, rhs)) = content.split_once(ASSIGNMENT_MARKER) {
        parse_assignment(lhs, rhs, &line.location)?
    } else if let Some(stmt) = KEYWORD_STATEMENT.captures(content) {
        let keyword = &stmt["keyword"];
        let expr = stmt.name("expr").map(|m| m.as_str().trim()).unwrap_or("");
        if expr.is_empty() {
            return Err(CompilerError::syntax_error(
                format!("'{}' requires an expression", keyword),
                line.location.clone(),
            ));
        }
        match keyword {
            "print" => LineKind::Print { expr: expr.to_string() },
            _ => LineKind::Return { expr: expr.to_string() },
        }
    } else if content.contains('(') {
        LineKind::Call {
            expr: content.to_string(),
        }
    } else {
        LineKind::Unrecognized
    };

    trace!("{}: {:?}", line.location, kind);
    Ok(kind)
}

fn parse_header(rest: Option<&str>, location: &SourceLocation) -> Result<LineKind, CompilerError> {
    let mut tokens = rest.unwrap_or("").split_whitespace();
    let name = tokens.next().ok_or_else(|| {
        CompilerError::syntax_error(
            "function header is missing a name".to_string(),
            location.clone(),
        )
    })?;

    if !IdentifierRegistry::validate(name) {
        return Err(CompilerError::InvalidIdentifier {
            name: name.to_string(),
            location: location.clone(),
        });
    }

    Ok(LineKind::FunctionHeader {
        name: name.to_string(),
        params: tokens.map(str::to_string).collect(),
    })
}

fn parse_assignment(
    lhs: &str,
    rhs: &str,
    location: &SourceLocation,
) -> Result<LineKind, CompilerError> {
    let name = lhs.trim();
    let expr = rhs.trim();

    if name.is_empty() || expr.is_empty() || name.contains(char::is_whitespace) {
        return Err(CompilerError::syntax_error(
            format!("malformed assignment '{} {} {}'", name, ASSIGNMENT_MARKER, expr),
            location.clone(),
        ));
    }
    if !IdentifierRegistry::validate(name) {
        return Err(CompilerError::InvalidIdentifier {
            name: name.to_string(),
            location: location.clone(),
        });
    }

    Ok(LineKind::Assignment {
        name: name.to_string(),
        expr: expr.to_string(),
    })
}
