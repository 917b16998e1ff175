//! # Generator Configuration
//!
//! Defaults shared by every subcommand, read from a YAML file so build
//! scripts do not have to repeat the source and build roots on each call:
//!
//! ```yaml
//! source_dir: /work/rabbits
//! build_dir: /work/rabbits/build
//! module_name: extra-models
//! module_version: 0.3.1
//! output_format: json
//! ```
//!
//! The file is `--config <path>` when given, otherwise `facgen.yaml` in the
//! current directory if it exists. Explicit command-line flags always win.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "facgen.yaml";

/// Serialization format of `facgen resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Contents of a `facgen.yaml` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root the descriptors live under.
    pub source_dir: Option<PathBuf>,
    /// Root the factory headers are generated under.
    pub build_dir: Option<PathBuf>,
    /// Loader module name.
    pub module_name: Option<String>,
    /// Loader module version.
    pub module_version: Option<String>,
    /// Default format of `facgen resolve`.
    pub output_format: Option<OutputFormat>,
}

impl GeneratorConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file: {}", path.display()))
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] in `dir` if
    /// present, else the empty configuration.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(config = %fallback.display(), "using default config file");
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}
