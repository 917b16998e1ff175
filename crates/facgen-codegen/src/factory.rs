//! # Factory Units
//!
//! Builds the [`FactoryUnit`] for one module model.
//!
//! | kind      | framework header               | base constructor arguments                         |
//! |-----------|--------------------------------|----------------------------------------------------|
//! | component | `rabbits/component/factory.h`  | type, description, implementation, priority        |
//! | plugin    | `rabbits/plugin/factory.h`     | name, description                                  |
//! | backend   | `rabbits/backend/factory.h`    | name, description                                  |

use std::path::Path;

use facgen_descriptor::{KindTag, ModuleKind, ModuleModel};

use crate::template::{FactoryUnit, ParamLine};

fn framework_header(tag: KindTag) -> &'static str {
    match tag {
        KindTag::Component => "rabbits/component/factory.h",
        KindTag::Plugin => "rabbits/plugin/factory.h",
        KindTag::Backend => "rabbits/backend/factory.h",
    }
}

fn factory_base(tag: KindTag) -> &'static str {
    match tag {
        KindTag::Component => "ComponentFactory",
        KindTag::Plugin => "PluginFactory",
        KindTag::Backend => "BackendFactory",
    }
}

fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

/// Resolve a class header against the directory of the descriptor that
/// names it. Absolute headers are kept.
pub fn class_include(descriptor: &Path, include: &str) -> String {
    let dir = descriptor.parent().unwrap_or_else(|| Path::new(""));
    dir.join(include).display().to_string()
}

/// Build the factory unit of `model`.
pub fn factory_unit(model: &ModuleModel) -> FactoryUnit {
    let tag = model.tag();

    let mut base_args = vec![quoted(model.identifier()), quoted(model.description())];
    if let ModuleKind::Component(component) = model.kind() {
        base_args.push(quoted(&component.implementation));
        base_args.push(component.priority.to_string());
    }

    let params = model
        .parameters()
        .iter()
        .map(|p| ParamLine {
            name: p.name.clone(),
            cc_type: p.cc_type.clone(),
            description: p.description.clone(),
            default: p.default.clone(),
            advanced: p.advanced,
        })
        .collect();

    FactoryUnit {
        framework_header: framework_header(tag),
        class_includes: model
            .includes()
            .iter()
            .map(|include| class_include(model.source(), include))
            .collect(),
        ident: model.factory_ident(),
        base: factory_base(tag),
        class: model.class().to_string(),
        base_args,
        params,
        discover: model.discover().map(str::to_string),
    }
}
