//! # Generic Default Parameters
//!
//! Every module exposes the same logging knobs to the framework's logger
//! wrapper, whether or not its descriptor mentions them. The defaults are
//! merged *beneath* the kind subtree, so a descriptor can change a default
//! value or description without having to restate the whole entry.

use serde_yaml::{Mapping, Value};

use crate::model::KindTag;
use crate::merge::deep_merge;

/// Default value of a built-in parameter.
#[derive(Clone, Copy)]
enum GenericDefault {
    Bool(bool),
    Str(&'static str),
}

impl GenericDefault {
    fn to_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
            Self::Str(s) => Value::String(s.to_string()),
        }
    }
}

/// A built-in parameter: name, type, default, description.
struct GenericParameter {
    name: &'static str,
    type_name: &'static str,
    default: GenericDefault,
    description: &'static str,
}

const GENERIC: [GenericParameter; 5] = [
    GenericParameter {
        name: "debug",
        type_name: "boolean",
        default: GenericDefault::Bool(false),
        description: "Enable debug messages for this module",
    },
    GenericParameter {
        name: "trace",
        type_name: "boolean",
        default: GenericDefault::Bool(false),
        description: "Enable trace messages for this module",
    },
    GenericParameter {
        name: "log-target",
        type_name: "string",
        default: GenericDefault::Str("stderr"),
        description: "Log target for this module (stdout, stderr or file)",
    },
    GenericParameter {
        name: "log-level",
        type_name: "string",
        default: GenericDefault::Str("info"),
        description: "Log level for this module (trace, debug, info, warning or error)",
    },
    GenericParameter {
        name: "log-file",
        type_name: "string",
        default: GenericDefault::Str(""),
        description: "Log file for this module when log-target is file",
    },
];

/// Names of the generic parameters, in the order they are emitted.
pub const GENERIC_PARAMETERS: [&str; 5] = ["debug", "trace", "log-target", "log-level", "log-file"];

/// The generic defaults fragment: `{ parameters: { debug: {...}, ... } }`.
pub fn generic_defaults() -> Value {
    let mut parameters = Mapping::new();
    for param in &GENERIC {
        let mut entry = Mapping::new();
        entry.insert("type".into(), param.type_name.into());
        entry.insert("default".into(), param.default.to_value());
        entry.insert("description".into(), param.description.into());
        entry.insert("advanced".into(), Value::Bool(true));
        parameters.insert(param.name.into(), Value::Mapping(entry));
    }

    let mut fragment = Mapping::new();
    fragment.insert("parameters".into(), Value::Mapping(parameters));
    Value::Mapping(fragment)
}

/// Layer the generic defaults beneath every module-kind subtree of `document`.
///
/// Kind subtrees that are not mappings are left alone; classification
/// reports them. A bare `parameters:` key (null) counts as an empty
/// mapping, so it cannot erase the generics.
pub fn apply_generic_defaults(document: Value) -> Value {
    let mut mapping = match document {
        Value::Mapping(mapping) => mapping,
        other => return other,
    };

    for kind in KindTag::ALL {
        if let Some(slot) = mapping.get_mut(kind.key()) {
            if let Value::Mapping(fields) = &mut *slot {
                if let Some(params) = fields.get_mut("parameters") {
                    if params.is_null() {
                        *params = Value::Mapping(Mapping::new());
                    }
                }
                let declared = std::mem::replace(slot, Value::Null);
                *slot = deep_merge(generic_defaults(), declared);
            }
        }
    }

    Value::Mapping(mapping)
}
