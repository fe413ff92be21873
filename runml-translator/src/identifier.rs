//! Identifier registry
//!
//! Globals, function names and parameters share one flat namespace. Names
//! are validated before they are stored and the registry refuses to grow
//! past its configured capacity.

use log::trace;
use runml_common::{CompilerError, SourceLocation};
use std::collections::HashSet;
use thiserror::Error;

/// Longest identifier the language accepts, in bytes
pub const MAX_IDENTIFIER_LEN: usize = 12;

/// Registry failures, converted into [`CompilerError`] by the parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("invalid identifier '{0}'")]
    Invalid(String),

    #[error("identifier capacity of {capacity} exceeded by '{name}'")]
    CapacityExceeded { name: String, capacity: usize },
}

impl IdentifierError {
    pub fn at(self, location: SourceLocation) -> CompilerError {
        match self {
            IdentifierError::Invalid(name) => CompilerError::InvalidIdentifier { name, location },
            IdentifierError::CapacityExceeded { name, capacity } => CompilerError::IdentifierLimit {
                name,
                limit: capacity,
                location,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentifierRegistry {
    /// Registration order, kept for deterministic iteration
    names: Vec<String>,
    lookup: HashSet<String>,
    capacity: usize,
}

impl IdentifierRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            names: Vec::new(),
            lookup: HashSet::new(),
            capacity,
        }
    }

    /// At most 12 bytes, none of them in `A`..=`Z`
    pub fn validate(name: &str) -> bool {
        name.len() <= MAX_IDENTIFIER_LEN && !name.bytes().any(|b| b.is_ascii_uppercase())
    }

    /// Validate and insert `name`. Re-registering a known name is a no-op.
    pub fn register(&mut self, name: &str) -> Result<(), IdentifierError> {
        if !Self::validate(name) {
            return Err(IdentifierError::Invalid(name.to_string()));
        }
        if self.exists(name) {
            return Ok(());
        }
        if self.names.len() >= self.capacity {
            return Err(IdentifierError::CapacityExceeded {
                name: name.to_string(),
                capacity: self.capacity,
            });
        }

        trace!(
            "registered identifier '{}' ({}/{})",
            name,
            self.names.len() + 1,
            self.capacity
        );
        self.lookup.insert(name.to_string());
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length_boundary() {
        assert!(IdentifierRegistry::validate("abcdefghijkl"));
        assert!(!IdentifierRegistry::validate("abcdefghijklm"));
        assert!(IdentifierRegistry::validate("x"));
    }

    #[test]
    fn test_validate_counts_bytes() {
        // 6 two-byte characters
        assert!(IdentifierRegistry::validate("éééééé"));
        // 7 characters, 14 bytes
        assert!(!IdentifierRegistry::validate("ééééééé"));
        assert!(!IdentifierRegistry::validate("abcdefghijké"));
    }

    #[test]
    fn test_validate_rejects_any_uppercase() {
        assert!(!IdentifierRegistry::validate("Total"));
        assert!(!IdentifierRegistry::validate("toTal"));
        assert!(!IdentifierRegistry::validate("totaL"));
    }

    #[test]
    fn test_validate_allows_digits_and_underscores() {
        assert!(IdentifierRegistry::validate("x_1"));
        assert!(IdentifierRegistry::validate("9lives"));
        assert!(IdentifierRegistry::validate("__"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = IdentifierRegistry::new(50);
        registry.register("x").unwrap();
        registry.register("x").unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.exists("x"));
        assert!(!registry.exists("y"));
    }

    #[test]
    fn test_register_rejects_invalid_name() {
        let mut registry = IdentifierRegistry::new(50);
        let err = registry.register("Bad").unwrap_err();
        assert_eq!(err, IdentifierError::Invalid("Bad".to_string()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_capacity_counts_distinct_names() {
        let mut registry = IdentifierRegistry::new(2);
        registry.register("a").unwrap();
        registry.register("b").unwrap();
        // known names never hit the limit
        registry.register("a").unwrap();

        let err = registry.register("c").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::CapacityExceeded {
                name: "c".to_string(),
                capacity: 2
            }
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_iter_keeps_registration_order() {
        let mut registry = IdentifierRegistry::new(10);
        for name in ["zeta", "alpha", "mid"] {
            registry.register(name).unwrap();
        }
        let names: Vec<&str> = registry.iter().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_error_conversion_keeps_location() {
        let location = SourceLocation::new_simple(3, 1);
        let err = IdentifierError::Invalid("Up".to_string()).at(location.clone());
        assert_eq!(
            err,
            CompilerError::InvalidIdentifier {
                name: "Up".to_string(),
                location
            }
        );
    }
}
