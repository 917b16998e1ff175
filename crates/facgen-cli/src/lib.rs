//! # facgen-cli — Factory Generator CLI
//!
//! Provides the `facgen` command-line interface over the descriptor and
//! codegen crates.
//!
//! ## Subcommands
//!
//! - `facgen factory` — One factory header from one descriptor.
//! - `facgen static-loader` — Static registration of many modules.
//! - `facgen dyn-loader` — Dynamically loadable module over many modules.
//! - `facgen resolve` — Print a descriptor after includes and defaults.
//!
//! Artifacts go to `-o <file>` or stdout; logs always go to stderr.

pub mod config;
pub mod generate;
pub mod resolve;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Write a fully rendered artifact to `output`, or stdout when `None`.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(text.as_bytes())
                .and_then(|()| writer.flush())
                .with_context(|| format!("writing output file: {}", path.display()))?;
            tracing::info!(output = %path.display(), bytes = text.len(), "wrote artifact");
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())
                .and_then(|()| lock.flush())
                .context("writing to stdout")?;
        }
    }
    Ok(())
}
