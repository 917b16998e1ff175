//! # Deep Merge
//!
//! Recursive union of two YAML trees where the overlay wins.
//!
//! | base      | overlay   | result                         |
//! |-----------|-----------|--------------------------------|
//! | mapping   | mapping   | key-wise merge, recursively    |
//! | anything  | other     | overlay replaces base wholesale |
//!
//! Sequences are leaves: an overlay sequence replaces the base sequence.
//! Key order is the base's order, with keys new to the overlay appended
//! in overlay order.

use serde_yaml::Value;

/// Merge `overlay` onto `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let existing = std::mem::replace(slot, Value::Null);
                        *slot = deep_merge(existing, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Mapping(base)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn overlay_leaf_wins() {
        let merged = deep_merge(yaml("a: 1\nb: 2"), yaml("b: 3"));
        assert_eq!(merged, yaml("a: 1\nb: 3"));
    }

    #[test]
    fn nested_mappings_merge_key_wise() {
        let merged = deep_merge(
            yaml("p:\n  x: {type: integer, default: 1}\n  y: {type: string}"),
            yaml("p:\n  x: {default: 2}\n  z: {type: boolean}"),
        );
        assert_eq!(
            merged,
            yaml("p:\n  x: {type: integer, default: 2}\n  y: {type: string}\n  z: {type: boolean}")
        );
    }

    #[test]
    fn sequences_are_replaced_not_concatenated() {
        let merged = deep_merge(yaml("include: [a.h, b.h]"), yaml("include: [c.h]"));
        assert_eq!(merged, yaml("include: [c.h]"));
    }

    #[test]
    fn mapping_replaced_by_scalar_and_back() {
        assert_eq!(deep_merge(yaml("a: {x: 1}"), yaml("a: 5")), yaml("a: 5"));
        assert_eq!(deep_merge(yaml("a: 5"), yaml("a: {x: 1}")), yaml("a: {x: 1}"));
    }

    #[test]
    fn base_order_is_kept_and_new_keys_appended() {
        let merged = deep_merge(yaml("b: 1\na: 1"), yaml("c: 1\nb: 2"));
        assert_eq!(keys(&merged), vec!["b", "a", "c"]);
    }

    #[test]
    fn include_chain_grouping_does_not_matter() {
        let a = yaml("{x: {p: 1}, y: 1}");
        let b = yaml("{x: {q: 2}, z: [1]}");
        let c = yaml("{x: {p: 3}, y: 2}");
        let left = deep_merge(deep_merge(a.clone(), b.clone()), c.clone());
        let right = deep_merge(a, deep_merge(b, c));
        assert_eq!(left, right);
        assert_eq!(left, yaml("{x: {p: 3, q: 2}, y: 2, z: [1]}"));
        assert_eq!(keys(&left), vec!["x", "y", "z"]);
    }

    #[test]
    fn null_overlay_replaces() {
        assert_eq!(deep_merge(yaml("a: 1"), Value::Null), Value::Null);
    }
}
