//! # Type Registry
//!
//! Maps the type names a descriptor may declare (`integer`, `boolean`,
//! `vector(time)`, ...) to converters that know the matching C++ type and
//! how to render a default value as a C++ literal.
//!
//! ## Composite Types
//!
//! `vector(T)` is not stored in the registry. Every lookup of a vector
//! name parses the inner name, looks it up recursively and wraps the
//! result in a [`VectorType`]. An unknown inner type makes the whole name
//! unknown. Because construction is a pure function of the name, repeated
//! lookups need no caching and no synchronization.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_yaml::Value;

use crate::convert::{describe_value, BooleanType, FloatType, IntType, StringType, TimeType};
use crate::error::ConvertError;

/// A parameter type known to the generator.
///
/// Implementations must be pure: `convert` may be called any number of
/// times, from any thread, for any module.
pub trait TypeConverter: fmt::Debug + Send + Sync {
    /// The name descriptors use to declare this type.
    fn type_name(&self) -> &str;

    /// The C++ type used in the emitted `Parameter<...>` declaration.
    fn cc_type(&self) -> String;

    /// Render `raw` as a C++ literal of [`cc_type`](Self::cc_type).
    fn convert(&self, raw: &Value) -> Result<String, ConvertError>;
}

/// Converter for `vector(T)`, wrapping the converter of `T`.
#[derive(Debug, Clone)]
pub struct VectorType {
    name: String,
    inner: Arc<dyn TypeConverter>,
}

impl VectorType {
    /// Wrap `inner` as the element converter of a vector type.
    pub fn new(inner: Arc<dyn TypeConverter>) -> Self {
        Self {
            name: format!("vector({})", inner.type_name()),
            inner,
        }
    }
}

impl TypeConverter for VectorType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn cc_type(&self) -> String {
        format!("std::vector<{}>", self.inner.cc_type())
    }

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        let items = match raw {
            Value::Sequence(items) => items,
            Value::Tagged(tagged) => return self.convert(&tagged.value),
            other => {
                return Err(ConvertError::NotAVector {
                    value: describe_value(other),
                    target: self.name.clone(),
                })
            }
        };

        if items.is_empty() {
            return Ok("{ }".to_string());
        }

        let elements = items
            .iter()
            .map(|item| self.inner.convert(item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("{{{}}}", elements.join(", ")))
    }
}

/// The set of scalar converters available to descriptors.
///
/// Built once at start-up and then only read. Cloning is cheap; the
/// converters themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    converters: HashMap<String, Arc<dyn TypeConverter>>,
}

impl TypeRegistry {
    /// A registry with no converters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every built-in scalar type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(StringType));
        for int in IntType::all() {
            registry.register(Arc::new(int));
        }
        registry.register(Arc::new(FloatType::double()));
        registry.register(Arc::new(FloatType::float()));
        registry.register(Arc::new(BooleanType));
        registry.register(Arc::new(TimeType));
        registry
    }

    /// Add a converter under its own type name, returning the one it replaces.
    pub fn register(&mut self, converter: Arc<dyn TypeConverter>) -> Option<Arc<dyn TypeConverter>> {
        self.converters
            .insert(converter.type_name().to_string(), converter)
    }

    /// Resolve a declared type name to a converter.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownType`] naming the full declared type
    /// when the name (or the element type of a vector) is not known.
    pub fn lookup(&self, type_name: &str) -> Result<Arc<dyn TypeConverter>, ConvertError> {
        let name = type_name.trim();

        if let Some(converter) = self.converters.get(name) {
            return Ok(Arc::clone(converter));
        }

        match vector_element(name) {
            Some(inner) => {
                let inner = self
                    .lookup(inner)
                    .map_err(|_| ConvertError::UnknownType(type_name.to_string()))?;
                Ok(Arc::new(VectorType::new(inner)))
            }
            None => Err(ConvertError::UnknownType(type_name.to_string())),
        }
    }

    /// Look up `type_name` and convert `raw` with it in one step.
    pub fn convert(&self, type_name: &str, raw: &Value) -> Result<String, ConvertError> {
        self.lookup(type_name)?.convert(raw)
    }
}

/// Extract `T` from `vector(T)`, tolerating whitespace around `T`.
fn vector_element(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("vector")?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?.trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}
