//! # Artifact Templates
//!
//! Typed records for the three artifacts, each rendered through its
//! [`Display`](fmt::Display) implementation. Records hold C++-ready text;
//! building them from module models happens in [`crate::factory`] and
//! [`crate::loader`].
//!
//! Every artifact begins with [`GENERATED_BANNER`].

use std::fmt;

use facgen_core::FactoryIdent;

/// First line of every generated artifact.
pub const GENERATED_BANNER: &str = "/* Auto-generated. Modifications will be overwritten */";

const INDENT: &str = "    ";

// ─── Factory ────────────────────────────────────────────────────────

/// One `add_param` statement of a factory constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLine {
    pub name: String,
    pub cc_type: String,
    pub description: String,
    pub default: String,
    pub advanced: bool,
}

impl fmt::Display for ParamLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "add_param(\"{}\", Parameter<{}>(\"{}\", {}, {}));",
            self.name, self.cc_type, self.description, self.default, self.advanced
        )
    }
}

/// A complete factory header for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryUnit {
    /// Framework header declaring the factory base template.
    pub framework_header: &'static str,
    /// Headers declaring the implementing class.
    pub class_includes: Vec<String>,
    pub ident: FactoryIdent,
    /// Factory base template (`ComponentFactory`, ...).
    pub base: &'static str,
    /// Implementing class, the base template argument.
    pub class: String,
    /// Base constructor arguments after `config`, as C++ expressions.
    pub base_args: Vec<String>,
    pub params: Vec<ParamLine>,
    /// Body statement of the `discover` override, without the semicolon.
    pub discover: Option<String>,
}

impl fmt::Display for FactoryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ident = &self.ident;
        let base = format!("{}<{}>", self.base, self.class);

        writeln!(f, "{GENERATED_BANNER}")?;
        writeln!(f)?;
        writeln!(f, "#include <{}>", self.framework_header)?;
        for include in &self.class_includes {
            writeln!(f, "#include \"{include}\"")?;
        }
        writeln!(f)?;
        writeln!(f, "namespace autogen {{")?;
        writeln!(f)?;
        writeln!(f, "class {ident} : public {base} {{")?;
        writeln!(f, "public:")?;
        writeln!(f, "{INDENT}{ident}(ConfigManager &config)")?;
        write!(f, "{INDENT}{INDENT}: {base}(config")?;
        for arg in &self.base_args {
            write!(f, ", {arg}")?;
        }
        writeln!(f, ")")?;
        writeln!(f, "{INDENT}{{")?;
        for param in &self.params {
            writeln!(f, "{INDENT}{INDENT}{param}")?;
        }
        writeln!(f, "{INDENT}}}")?;
        writeln!(f)?;
        writeln!(f, "{INDENT}virtual ~{ident}() {{}}")?;

        if let Some(snippet) = &self.discover {
            writeln!(f)?;
            writeln!(
                f,
                "{INDENT}virtual void discover(const std::string &name, const PlatformDescription &params)"
            )?;
            writeln!(f, "{INDENT}{{")?;
            writeln!(f, "{INDENT}{INDENT}Parameters cp = get_params();")?;
            writeln!(f, "{INDENT}{INDENT}cp.fill_from_description(params);")?;
            writeln!(f)?;
            writeln!(f, "{INDENT}{INDENT}{snippet};")?;
            writeln!(f, "{INDENT}}}")?;
        }

        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "}} /* namespace autogen */")
    }
}

// ─── Loaders ────────────────────────────────────────────────────────

/// Registration of one factory with its kind's manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Manager accessor on `ConfigManager` (`get_component_manager`, ...).
    pub manager: &'static str,
    pub ident: FactoryIdent,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config.{}().register_factory(std::make_shared<autogen::{}>(config));",
            self.manager, self.ident
        )
    }
}

/// Static or dynamic packaging of a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderFlavor {
    /// A plain registration function linked into the simulator.
    Static {
        /// C identifier prefix of `<prefix>_static_load`.
        prefix: String,
    },
    /// A shared object with the `rabbits_dynamic_*` entry points.
    Dynamic {
        /// C identifier prefix of the loader namespace and info record.
        prefix: String,
        /// Module name reported to the runtime.
        name: String,
        /// Module version reported to the runtime.
        version: String,
    },
}

/// A loader compilation unit registering every listed factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderUnit {
    /// Generated factory headers, in input order.
    pub self_includes: Vec<String>,
    /// Registrations, in input order.
    pub registrations: Vec<Registration>,
    pub flavor: LoaderFlavor,
}

impl LoaderUnit {
    fn write_registrations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for registration in &self.registrations {
            writeln!(f, "{INDENT}{registration}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LoaderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{GENERATED_BANNER}")?;
        writeln!(f)?;
        writeln!(f, "#include <memory>")?;
        writeln!(f)?;
        writeln!(f, "#include <rabbits/config/manager.h>")?;
        if matches!(self.flavor, LoaderFlavor::Dynamic { .. }) {
            writeln!(f, "#include <rabbits/dynloader/dynloader.h>")?;
        }
        writeln!(f)?;
        for include in &self.self_includes {
            writeln!(f, "#include \"{include}\"")?;
        }
        writeln!(f)?;

        match &self.flavor {
            LoaderFlavor::Static { prefix } => {
                writeln!(f, "void {prefix}_static_load(ConfigManager &config)")?;
                writeln!(f, "{{")?;
                self.write_registrations(f)?;
                writeln!(f, "}}")
            }
            LoaderFlavor::Dynamic { prefix, name, version } => {
                let ns = format!("{prefix}_autogen");

                writeln!(f, "namespace {ns} {{")?;
                writeln!(f)?;
                writeln!(f, "static bool loaded = false;")?;
                writeln!(f)?;
                writeln!(f, "static void load(ConfigManager &config)")?;
                writeln!(f, "{{")?;
                self.write_registrations(f)?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "}} /* namespace {ns} */")?;
                writeln!(f)?;
                writeln!(f, "extern \"C\" {{")?;
                writeln!(f)?;
                writeln!(f, "static const RabbitsDynamicInfo {prefix}_dyn_info = {{")?;
                writeln!(f, "{INDENT}.name = \"{name}\",")?;
                writeln!(f, "{INDENT}.version_str = \"{version}\",")?;
                writeln!(f, "}};")?;
                writeln!(f)?;
                writeln!(f, "int rabbits_dynamic_api_version(void)")?;
                writeln!(f, "{{")?;
                writeln!(f, "{INDENT}return RABBITS_API_VERSION;")?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "const RabbitsDynamicInfo * rabbits_dynamic_info(void)")?;
                writeln!(f, "{{")?;
                writeln!(f, "{INDENT}return &{prefix}_dyn_info;")?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "void rabbits_dynamic_load(ConfigManager &config)")?;
                writeln!(f, "{{")?;
                writeln!(f, "{INDENT}if (!{ns}::loaded) {{")?;
                writeln!(f, "{INDENT}{INDENT}{ns}::load(config);")?;
                writeln!(f, "{INDENT}{INDENT}{ns}::loaded = true;")?;
                writeln!(f, "{INDENT}}}")?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "void rabbits_dynamic_unload(void)")?;
                writeln!(f, "{{")?;
                writeln!(f, "{INDENT}{ns}::loaded = false;")?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "}} /* extern \"C\" */")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, cc_type: &str, default: &str) -> ParamLine {
        ParamLine {
            name: name.to_string(),
            cc_type: cc_type.to_string(),
            description: format!("{name} description"),
            default: default.to_string(),
            advanced: false,
        }
    }

    fn plugin_unit(discover: Option<&str>) -> FactoryUnit {
        FactoryUnit {
            framework_header: "rabbits/plugin/factory.h",
            class_includes: vec!["plugins/trace/trace.h".to_string()],
            ident: FactoryIdent::for_module("trace-plugin"),
            base: "PluginFactory",
            class: "TracePlugin".to_string(),
            base_args: vec!["\"trace-plugin\"".to_string(), "\"Tracer\"".to_string()],
            params: vec![param("depth", "int", "4")],
            discover: discover.map(str::to_string),
        }
    }

    #[test]
    fn param_line_renders_all_fields() {
        let mut line = param("size", "uint32_t", "2097152");
        line.advanced = true;
        assert_eq!(
            line.to_string(),
            "add_param(\"size\", Parameter<uint32_t>(\"size description\", 2097152, true));"
        );
    }

    #[test]
    fn factory_unit_layout() {
        let text = plugin_unit(None).to_string();
        let expected = "\
/* Auto-generated. Modifications will be overwritten */

#include <rabbits/plugin/factory.h>
#include \"plugins/trace/trace.h\"

namespace autogen {

class trace_pluginFactory : public PluginFactory<TracePlugin> {
public:
    trace_pluginFactory(ConfigManager &config)
        : PluginFactory<TracePlugin>(config, \"trace-plugin\", \"Tracer\")
    {
        add_param(\"depth\", Parameter<int>(\"depth description\", 4, false));
    }

    virtual ~trace_pluginFactory() {}
};

} /* namespace autogen */
";
        assert_eq!(text, expected);
    }

    #[test]
    fn discover_override_only_when_set() {
        assert!(!plugin_unit(None).to_string().contains("discover"));

        let text = plugin_unit(Some("TracePlugin::probe(name, cp)")).to_string();
        assert!(text.contains("virtual void discover(const std::string &name, const PlatformDescription &params)"));
        assert!(text.contains("        Parameters cp = get_params();\n        cp.fill_from_description(params);\n\n        TracePlugin::probe(name, cp);\n"));
    }

    #[test]
    fn registration_line() {
        let reg = Registration {
            manager: "get_backend_manager",
            ident: FactoryIdent::for_module("stdio"),
        };
        assert_eq!(
            reg.to_string(),
            "config.get_backend_manager().register_factory(std::make_shared<autogen::stdioFactory>(config));"
        );
    }

    fn loader(flavor: LoaderFlavor) -> LoaderUnit {
        LoaderUnit {
            self_includes: vec!["build/a.yml.h".to_string(), "build/b.yml.h".to_string()],
            registrations: vec![
                Registration {
                    manager: "get_component_manager",
                    ident: FactoryIdent::for_module("a"),
                },
                Registration {
                    manager: "get_plugin_manager",
                    ident: FactoryIdent::for_module("b"),
                },
            ],
            flavor,
        }
    }

    #[test]
    fn static_loader_layout() {
        let text = loader(LoaderFlavor::Static { prefix: "rabbits".to_string() }).to_string();
        let expected = "\
/* Auto-generated. Modifications will be overwritten */

#include <memory>

#include <rabbits/config/manager.h>

#include \"build/a.yml.h\"
#include \"build/b.yml.h\"

void rabbits_static_load(ConfigManager &config)
{
    config.get_component_manager().register_factory(std::make_shared<autogen::aFactory>(config));
    config.get_plugin_manager().register_factory(std::make_shared<autogen::bFactory>(config));
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn dynamic_loader_entry_points() {
        let text = loader(LoaderFlavor::Dynamic {
            prefix: "my_mod".to_string(),
            name: "my-mod".to_string(),
            version: "1.2".to_string(),
        })
        .to_string();

        assert!(text.starts_with(GENERATED_BANNER));
        assert!(text.contains("#include <rabbits/dynloader/dynloader.h>"));
        assert!(text.contains("namespace my_mod_autogen {"));
        assert!(text.contains("    .name = \"my-mod\",\n    .version_str = \"1.2\",\n"));
        assert!(text.contains("int rabbits_dynamic_api_version(void)"));
        assert!(text.contains("return &my_mod_dyn_info;"));
        assert!(text.contains("void rabbits_dynamic_load(ConfigManager &config)"));
        assert!(text.contains("void rabbits_dynamic_unload(void)"));
        assert!(!text.contains("_static_load"));

        let a = text.find("autogen::aFactory").unwrap();
        let b = text.find("autogen::bFactory").unwrap();
        assert!(a < b);
    }
}
