//! # Descriptor Errors
//!
//! Every failure between reading a descriptor file and holding a typed
//! module. All variants carry the path of the offending descriptor so the
//! CLI can report a single self-contained line.

use facgen_core::ConvertError;
use thiserror::Error;

/// Error while resolving or classifying a module descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The descriptor (or one of its includes) could not be read.
    #[error("cannot read descriptor '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The descriptor is not valid YAML.
    #[error("invalid YAML in '{path}': {source}")]
    Parse {
        /// Path of the malformed document.
        path: String,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The document-level `include` is neither a path nor a list of paths.
    #[error("invalid include directive in '{path}': expected a path or a list of paths, found {found}")]
    InvalidInclude {
        /// Descriptor holding the directive.
        path: String,
        /// Shape that was found instead.
        found: String,
    },

    /// A descriptor includes itself, directly or transitively.
    #[error("include cycle: {}", chain.join(" -> "))]
    IncludeCycle {
        /// Files on the include chain, ending with the repeated one.
        chain: Vec<String>,
    },

    /// The document does not declare exactly one module kind.
    #[error("invalid description file '{path}': {reason}")]
    InvalidKind {
        /// Offending descriptor.
        path: String,
        /// What was wrong with the top-level keys.
        reason: String,
    },

    /// Required keys are absent. Lists every missing key, not just the first.
    #[error("missing attribute(s): {} for {context} in '{path}'", attributes.join(","))]
    MissingAttributes {
        /// Offending descriptor.
        path: String,
        /// Where the keys were expected (e.g. "component", "parameter `size'").
        context: String,
        /// The absent keys, in declaration order of the requirement list.
        attributes: Vec<String>,
    },

    /// A key is present but holds a value of the wrong shape.
    #[error("invalid attribute `{attribute}' for {context} in '{path}': {reason}")]
    InvalidAttribute {
        /// Offending descriptor.
        path: String,
        /// Where the key was found.
        context: String,
        /// The key.
        attribute: String,
        /// What was expected.
        reason: String,
    },

    /// A parameter's type is unknown or its default does not convert.
    #[error("parameter `{parameter}' in '{path}': {source}")]
    Parameter {
        /// Offending descriptor.
        path: String,
        /// Parameter name.
        parameter: String,
        /// Type resolution or conversion failure.
        source: ConvertError,
    },
}

impl DescriptorError {
    /// The missing keys, when this is a [`DescriptorError::MissingAttributes`].
    pub fn missing_attributes(&self) -> Option<&[String]> {
        match self {
            Self::MissingAttributes { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}
