//! # facgen-core — Foundational Types for facgen
//!
//! This crate holds the pieces of the generator that do not depend on
//! descriptor files: the parameter type system and the identifier rules
//! shared by every emitted artifact.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit registry value.** [`TypeRegistry`] is built once with
//!    [`TypeRegistry::builtin`] and then passed by reference. There is no
//!    global table populated by static initializers.
//!
//! 2. **Composite types are pure lookups.** `vector(T)` is never
//!    registered. [`TypeRegistry::lookup`] builds a [`VectorType`] around
//!    the converter for `T` on every call, so lookups never mutate the
//!    registry.
//!
//! 3. **Native values are the identity.** A YAML boolean, integer or float
//!    that already has the target shape is rendered unchanged. Only string
//!    literals go through unit-suffix parsing.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `facgen-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod convert;
pub mod error;
pub mod ident;
pub mod types;

pub use convert::{BooleanType, FloatType, IntType, StringType, TimeType, TimeUnit};
pub use error::ConvertError;
pub use ident::{escape_description, FactoryIdent};
pub use types::{TypeConverter, TypeRegistry, VectorType};
