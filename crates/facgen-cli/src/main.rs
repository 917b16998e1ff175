//! # facgen CLI entry point
//!
//! Parses command-line arguments, loads the generator configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use facgen_cli::config::GeneratorConfig;
use facgen_cli::generate::{
    run_dyn_loader, run_factory, run_static_loader, DynLoaderArgs, FactoryArgs, StaticLoaderArgs,
};
use facgen_cli::resolve::{run_resolve, ResolveArgs};

/// Rabbits factory generator
///
/// Reads YAML module descriptors (components, plugins and backends) and
/// emits the C++ factories and loaders that register them with the
/// simulator.
#[derive(Parser, Debug)]
#[command(name = "facgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to ./facgen.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the factory header of one module.
    Factory(FactoryArgs),

    /// Generate a static loader registering every given module.
    StaticLoader(StaticLoaderArgs),

    /// Generate a dynamically loadable module registering every given module.
    DynLoader(DynLoaderArgs),

    /// Print a descriptor with includes and generic defaults applied.
    Resolve(ResolveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("facgen v{} starting", env!("CARGO_PKG_VERSION"));

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| GeneratorConfig::discover(cli.config.as_deref(), &cwd))
        .and_then(|config| match &cli.command {
            Commands::Factory(args) => run_factory(args, &config),
            Commands::StaticLoader(args) => run_static_loader(args, &config),
            Commands::DynLoader(args) => run_dyn_loader(args, &config),
            Commands::Resolve(args) => run_resolve(args, &config),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
