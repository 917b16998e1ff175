//! # Include Resolution
//!
//! A descriptor may pull shared fragments in through a document-level
//! `include` key:
//!
//! ```yaml
//! include: [../common/bus-slave.yml, irq.yml]
//! component:
//!   type: uart
//!   ...
//! ```
//!
//! Entries are paths relative to the including file's directory. Each one
//! is resolved recursively, then the results are folded left to right with
//! [`deep_merge`], so a later fragment overrides an earlier one. The file's
//! own content is merged last and always wins. The `include` key itself is
//! consumed and never appears in a resolved document.
//!
//! ## Cycles
//!
//! The chain of files currently being resolved is tracked by canonical
//! path. Re-entering a file already on the chain fails with
//! [`DescriptorError::IncludeCycle`]. The same fragment reached through two
//! different branches (a diamond) is not a cycle and is resolved twice.

use std::path::{Component, Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::DescriptorError;
use crate::merge::deep_merge;

/// Document-level key listing descriptor fragments.
pub const INCLUDE_KEY: &str = "include";

/// Load `path` and merge all of its includes beneath it.
///
/// # Errors
///
/// Fails when any file on the include tree cannot be read or parsed, when
/// an `include` directive is malformed, or when the includes form a cycle.
pub fn resolve(path: &Path) -> Result<Value, DescriptorError> {
    let mut chain = Vec::new();
    resolve_in(path, &mut chain)
}

fn resolve_in(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Value, DescriptorError> {
    let identity = std::fs::canonicalize(path).unwrap_or_else(|_| normalize(path));

    if chain.contains(&identity) {
        let mut cycle: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
        cycle.push(identity.display().to_string());
        return Err(DescriptorError::IncludeCycle { chain: cycle });
    }

    chain.push(identity);
    let result = resolve_file(path, chain);
    chain.pop();
    result
}

fn resolve_file(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Value, DescriptorError> {
    let document = load_document(path)?;
    let includes = include_entries(&document, path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut merged = Value::Mapping(Mapping::new());
    for entry in &includes {
        let fragment_path = base_dir.join(entry);
        tracing::trace!(
            descriptor = %path.display(),
            fragment = %fragment_path.display(),
            "resolving include"
        );
        let fragment = resolve_in(&fragment_path, chain)?;
        merged = deep_merge(merged, fragment);
    }

    let own = strip_include(document);
    merged = deep_merge(merged, own);

    tracing::debug!(
        descriptor = %path.display(),
        includes = includes.len(),
        "resolved descriptor"
    );
    Ok(merged)
}

fn load_document(path: &Path) -> Result<Value, DescriptorError> {
    let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| DescriptorError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Read the `include` directive of `document` as a list of paths.
///
/// An absent or null directive is an empty list and a single scalar is a
/// one-element list. Numbers and booleans are read through their text, so
/// `include: 2024` names the file `2024`.
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidInclude`] for a mapping, or for a
/// sequence holding anything other than scalars.
pub fn include_entries(document: &Value, path: &Path) -> Result<Vec<String>, DescriptorError> {
    let invalid = |found: &str| DescriptorError::InvalidInclude {
        path: path.display().to_string(),
        found: found.to_string(),
    };

    let directive = match document.as_mapping().and_then(|m| m.get(INCLUDE_KEY)) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(directive) => directive,
    };

    match directive {
        Value::Sequence(entries) => entries
            .iter()
            .map(|entry| match entry {
                Value::Sequence(_) => Err(invalid("a nested sequence")),
                Value::Mapping(_) => Err(invalid("a mapping inside the list")),
                other => scalar_text(other).ok_or_else(|| invalid("a non-scalar entry")),
            })
            .collect(),
        Value::Mapping(_) => Err(invalid("a mapping")),
        other => scalar_text(other)
            .map(|single| vec![single])
            .ok_or_else(|| invalid("an unsupported value")),
    }
}

/// Text of a scalar node. Null, collections and tagged values have none.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Drop the `include` key. An empty document counts as an empty mapping.
fn strip_include(document: Value) -> Value {
    match document {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .filter(|(key, _)| key.as_str() != Some(INCLUDE_KEY))
                .collect(),
        ),
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    }
}

/// Lexical normalization for paths that cannot be canonicalized.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn absent_include_is_empty() {
        let doc = yaml("component: {type: foo}");
        assert!(include_entries(&doc, Path::new("x.yml")).unwrap().is_empty());
        let doc = yaml("include: ~");
        assert!(include_entries(&doc, Path::new("x.yml")).unwrap().is_empty());
    }

    #[test]
    fn scalar_include_is_singleton() {
        let doc = yaml("include: common.yml");
        assert_eq!(include_entries(&doc, Path::new("x.yml")).unwrap(), vec!["common.yml"]);
    }

    #[test]
    fn sequence_include_keeps_order() {
        let doc = yaml("include: [b.yml, a.yml]");
        assert_eq!(
            include_entries(&doc, Path::new("x.yml")).unwrap(),
            vec!["b.yml", "a.yml"]
        );
    }

    #[test]
    fn mapping_include_is_invalid() {
        let doc = yaml("include: {path: a.yml}");
        let err = include_entries(&doc, Path::new("x.yml")).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidInclude { .. }), "got {err:?}");
        assert!(err.to_string().contains("x.yml"));
    }

    #[test]
    fn number_and_boolean_scalars_name_files() {
        let doc = yaml("include: 2024");
        assert_eq!(include_entries(&doc, Path::new("x.yml")).unwrap(), vec!["2024"]);
        let doc = yaml("include: [a.yml, 4, true]");
        assert_eq!(
            include_entries(&doc, Path::new("x.yml")).unwrap(),
            vec!["a.yml", "4", "true"]
        );
    }

    #[test]
    fn nested_collections_are_invalid() {
        for src in ["include: [[a.yml]]", "include: [a.yml, {b: c.yml}]", "include: [~]"] {
            let err = include_entries(&yaml(src), Path::new("x.yml")).unwrap_err();
            assert!(matches!(err, DescriptorError::InvalidInclude { .. }), "{src}: {err:?}");
        }
    }

    #[test]
    fn strip_include_keeps_key_order() {
        let stripped = strip_include(yaml("a: 1\ninclude: x.yml\nb: 2"));
        let keys: Vec<&str> = stripped
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_document_is_empty_mapping() {
        assert_eq!(strip_include(Value::Null), Value::Mapping(Mapping::new()));
    }

    #[test]
    fn normalize_folds_dot_components() {
        assert_eq!(normalize(Path::new("a/./b/../c.yml")), PathBuf::from("a/c.yml"));
        assert_eq!(normalize(Path::new("../x.yml")), PathBuf::from("../x.yml"));
    }
}
