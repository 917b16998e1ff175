//! # Generation Errors

use facgen_descriptor::DescriptorError;
use thiserror::Error;

/// Error while producing an artifact.
///
/// Request-shape errors ([`TooManyInputs`](Self::TooManyInputs),
/// [`NoInputs`](Self::NoInputs), [`MissingLoaderInfo`](Self::MissingLoaderInfo))
/// are raised before any descriptor is read.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Factory mode was given more than one descriptor.
    #[error("factory mode takes exactly one descriptor, got {count}")]
    TooManyInputs {
        /// Number of descriptors supplied.
        count: usize,
    },

    /// No descriptor was given.
    #[error("no descriptor files given")]
    NoInputs,

    /// The dynamic loader lacks its module name or version.
    #[error("dynamic loader requires a module {missing}")]
    MissingLoaderInfo {
        /// `"name"` or `"version"`.
        missing: &'static str,
    },

    /// A descriptor failed to resolve, classify or convert.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
