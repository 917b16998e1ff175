//! # Identifiers
//!
//! Module identifiers such as `char-backend-stdio` are valid descriptor
//! names but not valid C++ identifiers. [`FactoryIdent`] is the only path
//! from one to the other.

use std::fmt;

use serde::Serialize;

/// Name of a generated factory class: the module identifier with `-`
/// replaced by `_`, suffixed `Factory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FactoryIdent(String);

impl FactoryIdent {
    /// Derive the factory class name for a module identifier.
    pub fn for_module(identifier: &str) -> Self {
        Self(format!("{}Factory", identifier.replace('-', "_")))
    }

    /// The class name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactoryIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Make a multi-line description safe for a single-line C++ string literal.
pub fn escape_description(description: &str) -> String {
    description.replace('\n', "\\n")
}
