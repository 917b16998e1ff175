//! # Loader Units
//!
//! Static and dynamic loaders include the factory header generated for each
//! descriptor (its *self-include*) and register one factory per module with
//! the manager of the module's kind.
//!
//! ## Self-Include
//!
//! The factory header for `<src>/components/uart/uart.yml` is generated at
//! `<build>/components/uart/uart.yml.h`: the source-root prefix is swapped
//! for the build-root prefix and `.h` is appended. A descriptor outside
//! the source root keeps its path.

use std::path::{Path, PathBuf};

use facgen_descriptor::{KindTag, ModuleModel};

use crate::template::{LoaderFlavor, LoaderUnit, Registration};

/// Module prefix of a static loader when none is given.
pub const DEFAULT_MODULE_NAME: &str = "rabbits";

/// Source and build roots for self-include derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRoots {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl BuildRoots {
    /// Path of the factory header generated for `descriptor`.
    pub fn self_include(&self, descriptor: &Path) -> String {
        let header = match descriptor.strip_prefix(&self.source_dir) {
            Ok(relative) => self.build_dir.join(relative),
            Err(_) => descriptor.to_path_buf(),
        };
        format!("{}.h", header.display())
    }
}

fn manager_accessor(tag: KindTag) -> &'static str {
    match tag {
        KindTag::Component => "get_component_manager",
        KindTag::Plugin => "get_plugin_manager",
        KindTag::Backend => "get_backend_manager",
    }
}

/// A module name made usable as a C identifier prefix.
pub fn identifier_prefix(module_name: &str) -> String {
    module_name.replace(['-', '.'], "_")
}

/// Build a loader over `models`, preserving their order.
pub fn loader_unit(models: &[ModuleModel], roots: &BuildRoots, flavor: LoaderFlavor) -> LoaderUnit {
    LoaderUnit {
        self_includes: models.iter().map(|m| roots.self_include(m.source())).collect(),
        registrations: models
            .iter()
            .map(|m| Registration {
                manager: manager_accessor(m.tag()),
                ident: m.factory_ident(),
            })
            .collect(),
        flavor,
    }
}
