//! # facgen-descriptor — Module Descriptor Resolution
//!
//! Turns YAML module descriptors into typed [`ModuleModel`]s.
//!
//! ## Pipeline
//!
//! ```text
//! resolve(path)                include fragments merged beneath the file
//!   └─▶ apply_generic_defaults debug/trace/log-* merged beneath the kind subtree
//!         └─▶ ModuleModel      kind classified, required keys checked,
//!                              every parameter default converted
//! ```
//!
//! [`ModuleModel::load`] runs all three steps for one file.
//!
//! ## Merge Precedence
//!
//! Later sources win on leaf conflicts, and mappings merge key by key.
//! A descriptor always wins over the fragments it includes, and declared
//! parameters always win over the generic defaults.
//!
//! ## Crate Policy
//!
//! - Depends only on `facgen-core` internally.
//! - Every error names the descriptor file it came from.

pub mod defaults;
pub mod error;
pub mod merge;
pub mod model;
pub mod resolve;

pub use defaults::{apply_generic_defaults, generic_defaults, GENERIC_PARAMETERS};
pub use error::DescriptorError;
pub use merge::deep_merge;
pub use model::{ComponentSpec, KindTag, ModuleKind, ModuleModel, ParameterSpec};
pub use resolve::{include_entries, resolve, INCLUDE_KEY};
