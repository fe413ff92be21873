//! Translator configuration

/// Default number of distinct identifiers a program may introduce
pub const DEFAULT_MAX_IDENTIFIERS: usize = 50;

/// Options controlling a single translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Capacity of the identifier registry
    pub max_identifiers: usize,
    /// Drop unrecognized lines with a warning instead of failing
    pub allow_unrecognized: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_identifiers: DEFAULT_MAX_IDENTIFIERS,
            allow_unrecognized: false,
        }
    }
}

impl TranslatorConfig {
    pub fn with_max_identifiers(mut self, max_identifiers: usize) -> Self {
        self.max_identifiers = max_identifiers;
        self
    }

    pub fn with_allow_unrecognized(mut self, allow: bool) -> Self {
        self.allow_unrecognized = allow;
        self
    }
}
