//! # Resolve Subcommand
//!
//! `facgen resolve` prints a descriptor after include resolution and
//! generic-default layering, which is the document classification sees.
//! With `--model` it prints the typed module model instead, with every
//! parameter default already converted to its C++ literal.
//!
//! ```bash
//! facgen resolve components/uart/uart.yml
//! facgen resolve --model --format json components/uart/uart.yml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use facgen_core::TypeRegistry;
use facgen_descriptor::{apply_generic_defaults, resolve, ModuleModel};

use crate::config::{GeneratorConfig, OutputFormat};
use crate::write_output;

/// Arguments for `facgen resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Module descriptor.
    pub file: PathBuf,

    /// Output format. Defaults to the config file's, then YAML.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the typed module model instead of the merged document.
    #[arg(long)]
    pub model: bool,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("serializing YAML"),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .context("serializing JSON"),
    }
}

/// Execute `facgen resolve`.
pub fn run_resolve(args: &ResolveArgs, config: &GeneratorConfig) -> Result<u8> {
    let format = args.format.or(config.output_format).unwrap_or_default();

    let text = if args.model {
        let model = ModuleModel::load(&args.file, &TypeRegistry::builtin())?;
        render(&model, format)?
    } else {
        let document = apply_generic_defaults(resolve(&args.file)?);
        render(&document, format)?
    };

    write_output(&text, args.output.as_deref())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(dir: &std::path::Path) -> PathBuf {
        std::fs::write(
            dir.join("common.yml"),
            "component:\n  parameters:\n    size: {type: integer, default: 4k, description: Size}",
        )
        .unwrap();
        let path = dir.join("foo.yml");
        std::fs::write(
            &path,
            "include: common.yml\ncomponent: {type: foo, description: Foo, class: Foo, include: foo.h, implementation: default}",
        )
        .unwrap();
        path
    }

    #[test]
    fn resolved_document_as_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.yml");
        let args = ResolveArgs {
            file: descriptor(dir.path()),
            format: None,
            model: false,
            output: Some(out.clone()),
        };
        run_resolve(&args, &GeneratorConfig::default()).unwrap();

        let doc: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert!(doc.get("include").is_none());
        assert_eq!(doc["component"]["parameters"]["size"]["default"], "4k");
        assert_eq!(doc["component"]["parameters"]["debug"]["type"], "boolean");
    }

    #[test]
    fn model_as_json_from_config_format() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        let config = GeneratorConfig {
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let args = ResolveArgs {
            file: descriptor(dir.path()),
            format: None,
            model: true,
            output: Some(out.clone()),
        };
        run_resolve(&args, &config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["kind"], "component");
        assert_eq!(json["identifier"], "foo");
        let size = json["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "size")
            .unwrap();
        assert_eq!(size["default"], "4096");
    }
}
