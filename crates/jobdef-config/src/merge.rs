//! Recursive merge of configuration values.
//!
//! Mappings merge key by key; every other value (scalars, sequences, null)
//! in the overlay replaces the base value whole. An empty sequence is how
//! storage encodes an empty mapping, so it leaves a base mapping untouched.

use jobdef_core::Document;
use serde_json::Value;

/// Overlay `overlay` onto `base` in place.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_into(base_map, overlay_map);
        }
        (Value::Object(_), Value::Array(items)) if items.is_empty() => {}
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

/// Merge two mappings, `overlay` winning on conflicts.
pub fn merge_documents(base: &Document, overlay: &Document) -> Document {
    let mut result = base.clone();
    merge_into(&mut result, overlay);
    result
}

fn merge_into(base: &mut Document, overlay: &Document) {
    for (key, overlay_value) in overlay {
        match base.get_mut(key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => {
                base.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// Merge `overlay` onto a copy of `base`.
pub fn merged(base: &Value, overlay: &Value) -> Value {
    let mut result = base.clone();
    deep_merge(&mut result, overlay);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let result = merged(&json!({"a": {"x": 1, "y": 2}}), &json!({"a": {"y": 3}}));
        assert_eq!(result, json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_disjoint_keys_are_kept() {
        let result = merged(&json!({"a": 1}), &json!({"b": 2}));
        assert_eq!(result, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_sequences_are_replaced_not_merged() {
        let result = merged(
            &json!({"tables": ["in.c-main.a", "in.c-main.b"]}),
            &json!({"tables": ["in.c-main.c"]}),
        );
        assert_eq!(result, json!({"tables": ["in.c-main.c"]}));
    }

    #[test]
    fn test_scalar_replaces_mapping() {
        let result = merged(&json!({"a": {"x": 1}}), &json!({"a": "flat"}));
        assert_eq!(result, json!({"a": "flat"}));
    }

    #[test]
    fn test_mapping_replaces_scalar() {
        let result = merged(&json!({"a": 1}), &json!({"a": {"x": 1}}));
        assert_eq!(result, json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_empty_sequence_keeps_base_mapping() {
        let result = merged(
            &json!({"parameters": {"c": "d"}, "storage": {"input": {"tables": [1]}}}),
            &json!({"parameters": [], "storage": []}),
        );
        assert_eq!(
            result,
            json!({"parameters": {"c": "d"}, "storage": {"input": {"tables": [1]}}})
        );
    }

    #[test]
    fn test_empty_sequence_replaces_sequence() {
        let result = merged(&json!({"tables": ["in.c-main.a"]}), &json!({"tables": []}));
        assert_eq!(result, json!({"tables": []}));
    }

    #[test]
    fn test_non_empty_sequence_replaces_mapping() {
        let result = merged(&json!({"a": {"x": 1}}), &json!({"a": [1]}));
        assert_eq!(result, json!({"a": [1]}));
    }

    #[test]
    fn test_explicit_null_wins() {
        let result = merged(&json!({"a": {"x": 1}, "b": 2}), &json!({"a": null}));
        assert_eq!(result, json!({"a": null, "b": 2}));
    }

    #[test]
    fn test_merging_same_overlay_twice_is_stable() {
        let overlay = json!({"parameters": {"db": {"host": "localhost"}}});
        let once = merged(&json!({"parameters": {"db": {"port": 5432}}}), &overlay);
        let twice = merged(&once, &overlay);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_documents_leaves_inputs_untouched() {
        let base = json!({"parameters": {"c": "d"}});
        let overlay = json!({"parameters": {"a": "b"}});
        let result = merge_documents(base.as_object().unwrap(), overlay.as_object().unwrap());

        assert_eq!(Value::Object(result), json!({"parameters": {"a": "b", "c": "d"}}));
        assert_eq!(base, json!({"parameters": {"c": "d"}}));
    }

    #[test]
    fn test_empty_overlay_keeps_base() {
        let base = json!({"storage": {"input": {"tables": []}}});
        assert_eq!(merged(&base, &json!({})), base);
    }
}
