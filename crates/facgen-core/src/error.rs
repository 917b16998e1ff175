//! # Error Types — Parameter Conversion
//!
//! Failures raised while turning a raw descriptor value into a C++ literal.
//! Descriptor-level context (file, parameter name) is attached by the
//! caller; these errors only describe the value and the target type.

use thiserror::Error;

/// Error while resolving a parameter type or converting its default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The type name matches no registered converter and is not a
    /// well-formed `vector(...)` over a known type.
    #[error("unknown type `{0}'")]
    UnknownType(String),

    /// The raw value cannot be represented in the target type.
    #[error("cannot convert `{value}' to {target}: {reason}")]
    Invalid {
        /// Textual form of the offending raw value.
        value: String,
        /// Declared type name the value was converted to.
        target: String,
        /// Why the conversion was rejected.
        reason: String,
    },

    /// The value parsed, but does not fit the C++ type of the target.
    #[error("`{value}' is out of range for {target} [{min}, {max}]")]
    OutOfRange {
        /// Textual form of the offending raw value.
        value: String,
        /// Declared type name the value was converted to.
        target: String,
        /// Smallest representable value.
        min: i128,
        /// Largest representable value.
        max: i128,
    },

    /// A `vector(...)` parameter whose raw value is not a sequence.
    #[error("`{value}' is not a vector (declared type `{target}')")]
    NotAVector {
        /// Textual form of the offending raw value.
        value: String,
        /// Declared vector type name.
        target: String,
    },
}

impl ConvertError {
    pub(crate) fn invalid(
        value: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            value: value.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}
