//! # facgen-codegen — Artifact Generation
//!
//! Renders C++ registration code for Rabbits modules from typed
//! [`ModuleModel`](facgen_descriptor::ModuleModel)s.
//!
//! ## Artifacts
//!
//! | mode            | inputs | output                                                        |
//! |-----------------|--------|---------------------------------------------------------------|
//! | `factory`       | 1      | `autogen::<Ident>Factory` class with one `add_param` per parameter |
//! | `static-loader` | N      | `<module>_static_load(ConfigManager &)` registering every factory |
//! | `dyn-loader`    | N      | loader namespace plus the `rabbits_dynamic_*` entry points     |
//!
//! ## Crate Policy
//!
//! - Rendering is pure: [`generate`] returns the artifact text and never
//!   touches the output destination.
//! - Request-shape errors are raised before any descriptor is read.

pub mod error;
pub mod factory;
pub mod generate;
pub mod loader;
pub mod template;

pub use error::CodegenError;
pub use factory::{class_include, factory_unit};
pub use generate::{generate, load_models, GenerateRequest, Mode};
pub use loader::{identifier_prefix, loader_unit, BuildRoots, DEFAULT_MODULE_NAME};
pub use template::{
    FactoryUnit, LoaderFlavor, LoaderUnit, ParamLine, Registration, GENERATED_BANNER,
};
