//! # Module Model
//!
//! The typed form of one resolved descriptor.
//!
//! ## Classification
//!
//! A descriptor declares its kind through a single top-level key:
//! `component`, `plugin` or `backend`. Exactly one must be present; other
//! top-level keys are ignored. The kind selects the required attributes:
//!
//! | kind      | required                                                    | optional                        |
//! |-----------|-------------------------------------------------------------|---------------------------------|
//! | component | `type`/`name`, `description`, `class`, `include`, `implementation` | `discover`, `priority` (0), `parameters` |
//! | backend   | `type`/`name`, `description`, `class`, `include`            | `discover`, `parameters`        |
//! | plugin    | `type`/`name`, `description`, `class`, `include`            | `parameters`                    |
//!
//! All missing attributes are reported in one error.

use std::fmt;
use std::path::{Path, PathBuf};

use facgen_core::{escape_description, BooleanType, FactoryIdent, TypeRegistry};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::defaults::apply_generic_defaults;
use crate::error::DescriptorError;
use crate::resolve::{resolve, scalar_text};

// ─── Kinds ──────────────────────────────────────────────────────────

/// The top-level key a descriptor is classified by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    /// A hardware model instantiated in a platform.
    Component,
    /// A simulation plugin.
    Plugin,
    /// A host-side backend (character device, framebuffer, ...).
    Backend,
}

impl KindTag {
    /// Every kind, in classification order.
    pub const ALL: [KindTag; 3] = [Self::Component, Self::Plugin, Self::Backend];

    /// The top-level descriptor key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Plugin => "plugin",
            Self::Backend => "backend",
        }
    }

    /// Attributes the kind subtree must carry, besides the identifier.
    fn required(&self) -> &'static [&'static str] {
        match self {
            Self::Component => &["description", "class", "include", "implementation"],
            Self::Plugin | Self::Backend => &["description", "class", "include"],
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Component-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSpec {
    /// Name of this implementation of the component interface.
    pub implementation: String,
    /// Preference among implementations of the same type; higher wins.
    pub priority: i64,
}

/// Kind of a module, with the attributes only that kind carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModuleKind {
    /// A component and its implementation details.
    Component(ComponentSpec),
    /// A plugin.
    Plugin,
    /// A backend.
    Backend,
}

impl ModuleKind {
    /// The tag of this kind.
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Component(_) => KindTag::Component,
            Self::Plugin => KindTag::Plugin,
            Self::Backend => KindTag::Backend,
        }
    }
}

// ─── Parameters ─────────────────────────────────────────────────────

/// One typed parameter with its default already rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name, unique within the module.
    pub name: String,
    /// Type name as declared (`integer`, `vector(time)`, ...).
    pub type_name: String,
    /// C++ type of the parameter.
    pub cc_type: String,
    /// Default value as written in the descriptor.
    pub raw_default: Value,
    /// Default value rendered as a C++ literal.
    pub default: String,
    /// Description, with newlines escaped.
    pub description: String,
    /// Hidden from non-advanced help output.
    pub advanced: bool,
}

const PARAMETER_REQUIRED: [&str; 3] = ["type", "default", "description"];

impl ParameterSpec {
    fn from_entry(
        name: &str,
        entry: &Value,
        path: &Path,
        registry: &TypeRegistry,
    ) -> Result<Self, DescriptorError> {
        let context = format!("parameter `{name}'");
        let fields = entry.as_mapping().ok_or_else(|| DescriptorError::InvalidAttribute {
            path: path.display().to_string(),
            context: context.clone(),
            attribute: name.to_string(),
            reason: "expected a mapping with type, default and description".to_string(),
        })?;

        let missing: Vec<String> = PARAMETER_REQUIRED
            .iter()
            .filter(|key| !fields.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DescriptorError::MissingAttributes {
                path: path.display().to_string(),
                context,
                attributes: missing,
            });
        }

        let attrs = Attributes { fields, path, context: &context };
        let type_name = attrs.string("type")?;
        let description = attrs.string("description")?;
        let raw_default = fields.get("default").cloned().unwrap_or(Value::Null);

        let parameter_error = |source| DescriptorError::Parameter {
            path: path.display().to_string(),
            parameter: name.to_string(),
            source,
        };

        let converter = registry.lookup(&type_name).map_err(parameter_error)?;
        let default = converter.convert(&raw_default).map_err(parameter_error)?;
        let advanced = match fields.get("advanced") {
            None | Some(Value::Null) => false,
            Some(value) => BooleanType.parse(value).map_err(parameter_error)?,
        };

        Ok(Self {
            name: name.to_string(),
            type_name,
            cc_type: converter.cc_type(),
            raw_default,
            default,
            description: escape_description(&description),
            advanced,
        })
    }
}

// ─── Module ─────────────────────────────────────────────────────────

/// A classified, validated and fully converted module descriptor.
///
/// Built once per input file and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleModel {
    source: PathBuf,
    identifier: String,
    description: String,
    class: String,
    includes: Vec<String>,
    discover: Option<String>,
    parameters: Vec<ParameterSpec>,
    #[serde(flatten)]
    kind: ModuleKind,
}

impl ModuleModel {
    /// Resolve the descriptor at `path`, layer the generic defaults beneath
    /// it and build its model.
    pub fn load(path: &Path, registry: &TypeRegistry) -> Result<Self, DescriptorError> {
        let document = apply_generic_defaults(resolve(path)?);
        Self::from_document(path, &document, registry)
    }

    /// Build a model from an already merged document.
    ///
    /// `path` is only used for error messages and include/self-include
    /// derivation; nothing is read from disk.
    ///
    /// # Errors
    ///
    /// - [`DescriptorError::InvalidKind`] unless exactly one kind key is present.
    /// - [`DescriptorError::MissingAttributes`] listing every absent required key.
    /// - [`DescriptorError::InvalidAttribute`] for keys of the wrong shape.
    /// - [`DescriptorError::Parameter`] for unknown types or bad defaults.
    pub fn from_document(
        path: &Path,
        document: &Value,
        registry: &TypeRegistry,
    ) -> Result<Self, DescriptorError> {
        let (tag, fields) = classify(path, document)?;
        let context = tag.key().to_string();

        let mut missing = Vec::new();
        if !fields.contains_key("type") && !fields.contains_key("name") {
            missing.push("type".to_string());
        }
        missing.extend(
            tag.required()
                .iter()
                .filter(|key| !fields.contains_key(**key))
                .map(|key| key.to_string()),
        );
        if !missing.is_empty() {
            return Err(DescriptorError::MissingAttributes {
                path: path.display().to_string(),
                context,
                attributes: missing,
            });
        }

        let attrs = Attributes { fields, path, context: &context };
        let identifier = if fields.contains_key("type") {
            attrs.string("type")?
        } else {
            attrs.string("name")?
        };

        let kind = match tag {
            KindTag::Component => ModuleKind::Component(ComponentSpec {
                implementation: attrs.string("implementation")?,
                priority: attrs.priority()?,
            }),
            KindTag::Plugin => ModuleKind::Plugin,
            KindTag::Backend => ModuleKind::Backend,
        };

        let discover = match tag {
            KindTag::Component | KindTag::Backend => attrs.optional_string("discover")?,
            KindTag::Plugin => None,
        };

        let parameters = match fields.get("parameters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Mapping(entries)) => entries
                .iter()
                .map(|(name, entry)| {
                    let name = scalar_text(name).ok_or_else(|| attrs.invalid(
                        "parameters",
                        "parameter names must be scalars",
                    ))?;
                    ParameterSpec::from_entry(&name, entry, path, registry)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(attrs.invalid("parameters", "expected a mapping")),
        };

        let model = Self {
            source: path.to_path_buf(),
            description: escape_description(&attrs.string("description")?),
            class: attrs.string("class")?,
            includes: attrs.string_list("include")?,
            identifier,
            discover,
            parameters,
            kind,
        };

        tracing::debug!(
            descriptor = %path.display(),
            kind = %tag,
            module = %model.identifier,
            parameters = model.parameters.len(),
            "built module model"
        );
        Ok(model)
    }

    /// Path of the descriptor this model was built from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Module identifier (`type`, or legacy `name`).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Name of the generated factory class.
    pub fn factory_ident(&self) -> FactoryIdent {
        FactoryIdent::for_module(&self.identifier)
    }

    /// Description, with newlines escaped.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Implementing C++ class.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Headers declaring the implementing class, as written.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Discovery snippet, for components and backends that declare one.
    pub fn discover(&self) -> Option<&str> {
        self.discover.as_deref()
    }

    /// Parameters in emission order: generic defaults first.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Kind and kind-specific attributes.
    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    /// Kind tag.
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }
}

/// Find the single kind key of `document` and return its subtree.
fn classify<'a>(path: &Path, document: &'a Value) -> Result<(KindTag, &'a Mapping), DescriptorError> {
    let invalid = |reason: String| DescriptorError::InvalidKind {
        path: path.display().to_string(),
        reason,
    };

    let top = document
        .as_mapping()
        .ok_or_else(|| invalid("document is not a mapping".to_string()))?;

    let present: Vec<KindTag> = KindTag::ALL
        .into_iter()
        .filter(|kind| top.contains_key(kind.key()))
        .collect();

    let tag = match present.as_slice() {
        [tag] => *tag,
        [] => {
            let keys: Vec<String> = top.keys().filter_map(scalar_text).collect();
            return Err(invalid(format!(
                "expected one of component, plugin or backend, found [{}]",
                keys.join(", ")
            )));
        }
        several => {
            let keys: Vec<&str> = several.iter().map(KindTag::key).collect();
            return Err(invalid(format!(
                "declares several module kinds: {}",
                keys.join(", ")
            )));
        }
    };

    let fields = top
        .get(tag.key())
        .and_then(Value::as_mapping)
        .ok_or_else(|| invalid(format!("`{tag}' must be a mapping")))?;

    Ok((tag, fields))
}

/// Typed accessors over one descriptor mapping, producing located errors.
struct Attributes<'a> {
    fields: &'a Mapping,
    path: &'a Path,
    context: &'a str,
}

impl Attributes<'_> {
    fn invalid(&self, attribute: &str, reason: &str) -> DescriptorError {
        DescriptorError::InvalidAttribute {
            path: self.path.display().to_string(),
            context: self.context.to_string(),
            attribute: attribute.to_string(),
            reason: reason.to_string(),
        }
    }

    fn string(&self, key: &str) -> Result<String, DescriptorError> {
        self.fields
            .get(key)
            .and_then(scalar_text)
            .ok_or_else(|| self.invalid(key, "expected a string"))
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>, DescriptorError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| self.invalid(key, "expected a string")),
        }
    }

    fn string_list(&self, key: &str) -> Result<Vec<String>, DescriptorError> {
        match self.fields.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| self.invalid(key, "expected a list of strings"))
                })
                .collect(),
            Some(value) => scalar_text(value)
                .map(|s| vec![s])
                .ok_or_else(|| self.invalid(key, "expected a string or a list of strings")),
            None => Ok(Vec::new()),
        }
    }

    fn priority(&self) -> Result<i64, DescriptorError> {
        match self.fields.get("priority") {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| self.invalid("priority", "expected an integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| self.invalid("priority", "expected an integer")),
            Some(_) => Err(self.invalid("priority", "expected an integer")),
        }
    }
}
