//! # Generation Entry Point
//!
//! [`generate`] validates the request shape, loads one [`ModuleModel`] per
//! input in order, and renders the selected artifact to a `String`.
//! Nothing is written anywhere; the caller owns the destination.

use std::fmt;
use std::path::PathBuf;

use facgen_core::TypeRegistry;
use facgen_descriptor::ModuleModel;

use crate::error::CodegenError;
use crate::factory::factory_unit;
use crate::loader::{identifier_prefix, loader_unit, BuildRoots, DEFAULT_MODULE_NAME};
use crate::template::LoaderFlavor;

/// Artifact to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One factory header from exactly one descriptor.
    Factory,
    /// A static registration function over every descriptor.
    StaticLoader {
        /// Function prefix, [`DEFAULT_MODULE_NAME`] when absent.
        module_name: Option<String>,
    },
    /// A dynamically loadable module over every descriptor.
    DynLoader {
        module_name: Option<String>,
        module_version: Option<String>,
    },
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Factory => "factory",
            Self::StaticLoader { .. } => "static-loader",
            Self::DynLoader { .. } => "dyn-loader",
        })
    }
}

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub mode: Mode,
    /// Descriptor paths, in output order.
    pub inputs: Vec<PathBuf>,
    pub roots: BuildRoots,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl GenerateRequest {
    /// Reject malformed requests before any file is read.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.inputs.is_empty() {
            return Err(CodegenError::NoInputs);
        }
        match &self.mode {
            Mode::Factory if self.inputs.len() > 1 => Err(CodegenError::TooManyInputs {
                count: self.inputs.len(),
            }),
            Mode::DynLoader { module_name, .. } if present(module_name).is_none() => {
                Err(CodegenError::MissingLoaderInfo { missing: "name" })
            }
            Mode::DynLoader { module_version, .. } if present(module_version).is_none() => {
                Err(CodegenError::MissingLoaderInfo { missing: "version" })
            }
            _ => Ok(()),
        }
    }

    fn loader_flavor(&self) -> Option<LoaderFlavor> {
        match &self.mode {
            Mode::Factory => None,
            Mode::StaticLoader { module_name } => Some(LoaderFlavor::Static {
                prefix: identifier_prefix(present(module_name).unwrap_or(DEFAULT_MODULE_NAME)),
            }),
            Mode::DynLoader { module_name, module_version } => {
                let name = present(module_name).unwrap_or_default();
                Some(LoaderFlavor::Dynamic {
                    prefix: identifier_prefix(name),
                    name: name.to_string(),
                    version: present(module_version).unwrap_or_default().to_string(),
                })
            }
        }
    }
}

/// Load one model per descriptor path, in order.
pub fn load_models(
    inputs: &[PathBuf],
    registry: &TypeRegistry,
) -> Result<Vec<ModuleModel>, CodegenError> {
    inputs
        .iter()
        .map(|path| ModuleModel::load(path, registry).map_err(CodegenError::from))
        .collect()
}

/// Produce the artifact text for `request`.
///
/// # Errors
///
/// Request-shape errors come first, then the first descriptor failure in
/// input order.
pub fn generate(request: &GenerateRequest, registry: &TypeRegistry) -> Result<String, CodegenError> {
    request.validate()?;
    let models = load_models(&request.inputs, registry)?;

    let text = match request.loader_flavor() {
        None => match models.first() {
            Some(model) => factory_unit(model).to_string(),
            None => return Err(CodegenError::NoInputs),
        },
        Some(flavor) => loader_unit(&models, &request.roots, flavor).to_string(),
    };

    tracing::debug!(
        mode = %request.mode,
        modules = models.len(),
        bytes = text.len(),
        "rendered artifact"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: Mode, inputs: &[&str]) -> GenerateRequest {
        GenerateRequest {
            mode,
            inputs: inputs.iter().map(PathBuf::from).collect(),
            roots: BuildRoots::default(),
        }
    }

    #[test]
    fn factory_with_two_inputs_fails_before_reading() {
        // Neither path exists: an IO error would mean a file was touched.
        let err = generate(
            &request(Mode::Factory, &["/nonexistent/a.yml", "/nonexistent/b.yml"]),
            &TypeRegistry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::TooManyInputs { count: 2 }), "got {err:?}");
    }

    #[test]
    fn no_inputs_is_rejected() {
        let err = request(Mode::StaticLoader { module_name: None }, &[])
            .validate()
            .unwrap_err();
        assert!(matches!(err, CodegenError::NoInputs));
    }

    #[test]
    fn dyn_loader_needs_name_and_version() {
        let err = request(
            Mode::DynLoader { module_name: None, module_version: Some("1".into()) },
            &["a.yml"],
        )
        .validate()
        .unwrap_err();
        assert!(matches!(err, CodegenError::MissingLoaderInfo { missing: "name" }));

        let err = request(
            Mode::DynLoader { module_name: Some("m".into()), module_version: Some(String::new()) },
            &["a.yml"],
        )
        .validate()
        .unwrap_err();
        assert!(matches!(err, CodegenError::MissingLoaderInfo { missing: "version" }));
        assert_eq!(err.to_string(), "dynamic loader requires a module version");
    }

    #[test]
    fn static_loader_prefix_defaults() {
        let flavor = request(Mode::StaticLoader { module_name: None }, &["a.yml"]).loader_flavor();
        assert_eq!(flavor, Some(LoaderFlavor::Static { prefix: "rabbits".into() }));

        let flavor = request(
            Mode::StaticLoader { module_name: Some("my-mod".into()) },
            &["a.yml"],
        )
        .loader_flavor();
        assert_eq!(flavor, Some(LoaderFlavor::Static { prefix: "my_mod".into() }));
    }

    #[test]
    fn mode_display_matches_subcommands() {
        assert_eq!(Mode::Factory.to_string(), "factory");
        assert_eq!(Mode::StaticLoader { module_name: None }.to_string(), "static-loader");
        assert_eq!(
            Mode::DynLoader { module_name: None, module_version: None }.to_string(),
            "dyn-loader"
        );
    }
}
