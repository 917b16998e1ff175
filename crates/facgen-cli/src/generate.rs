//! # Generation Subcommands
//!
//! `facgen factory`, `facgen static-loader` and `facgen dyn-loader`.
//!
//! ## Usage
//!
//! ```bash
//! # One factory header per descriptor:
//! facgen factory -o build/components/uart/uart.yml.h components/uart/uart.yml
//!
//! # Register every model of the simulator at startup:
//! facgen static-loader -s . -b build -o build/static_loader.cc components/*/*.yml
//!
//! # Package extra models as a loadable module:
//! facgen dyn-loader -s . -b build -m extra-models -V 0.3.1 -o build/extra.cc extra/*.yml
//! ```
//!
//! The artifact is rendered completely before the output is opened, so a
//! failing run never creates or truncates the output file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use facgen_codegen::{generate, BuildRoots, GenerateRequest, Mode};
use facgen_core::TypeRegistry;

use crate::config::GeneratorConfig;
use crate::write_output;

/// Arguments for `facgen factory`.
#[derive(Args, Debug)]
pub struct FactoryArgs {
    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Module descriptor. Exactly one is accepted.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Source and build roots shared by both loader subcommands.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Source root the descriptors live under.
    #[arg(short = 's', long)]
    pub source_dir: Option<PathBuf>,

    /// Build root the factory headers are generated under.
    #[arg(short = 'b', long)]
    pub build_dir: Option<PathBuf>,
}

impl RootArgs {
    fn resolve(&self, config: &GeneratorConfig) -> BuildRoots {
        BuildRoots {
            source_dir: self
                .source_dir
                .clone()
                .or_else(|| config.source_dir.clone())
                .unwrap_or_default(),
            build_dir: self
                .build_dir
                .clone()
                .or_else(|| config.build_dir.clone())
                .unwrap_or_default(),
        }
    }
}

/// Arguments for `facgen static-loader`.
#[derive(Args, Debug)]
pub struct StaticLoaderArgs {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Prefix of the generated `<name>_static_load` function.
    #[arg(short = 'm', long)]
    pub module_name: Option<String>,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Module descriptors, registered in the order given.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `facgen dyn-loader`.
#[derive(Args, Debug)]
pub struct DynLoaderArgs {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Module name reported to the runtime.
    #[arg(short = 'm', long)]
    pub module_name: Option<String>,

    /// Module version reported to the runtime.
    #[arg(short = 'V', long)]
    pub module_version: Option<String>,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Module descriptors, registered in the order given.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

fn run(request: GenerateRequest, output: Option<&Path>) -> Result<u8> {
    let registry = TypeRegistry::builtin();
    tracing::info!(mode = %request.mode, inputs = request.inputs.len(), "generating");

    let text = generate(&request, &registry)?;
    write_output(&text, output)?;
    Ok(0)
}

/// Execute `facgen factory`.
pub fn run_factory(args: &FactoryArgs, _config: &GeneratorConfig) -> Result<u8> {
    run(
        GenerateRequest {
            mode: Mode::Factory,
            inputs: args.files.clone(),
            roots: BuildRoots::default(),
        },
        args.output.as_deref(),
    )
}

/// Execute `facgen static-loader`.
pub fn run_static_loader(args: &StaticLoaderArgs, config: &GeneratorConfig) -> Result<u8> {
    run(
        GenerateRequest {
            mode: Mode::StaticLoader {
                module_name: args.module_name.clone().or_else(|| config.module_name.clone()),
            },
            inputs: args.files.clone(),
            roots: args.roots.resolve(config),
        },
        args.output.as_deref(),
    )
}

/// Execute `facgen dyn-loader`.
pub fn run_dyn_loader(args: &DynLoaderArgs, config: &GeneratorConfig) -> Result<u8> {
    run(
        GenerateRequest {
            mode: Mode::DynLoader {
                module_name: args.module_name.clone().or_else(|| config.module_name.clone()),
                module_version: args
                    .module_version
                    .clone()
                    .or_else(|| config.module_version.clone()),
            },
            inputs: args.files.clone(),
            roots: args.roots.resolve(config),
        },
        args.output.as_deref(),
    )
}
