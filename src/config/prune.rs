//! Recursive pruning of empty configuration values.
//!
//! The persisted user configuration may carry placeholder keys with empty
//! values (an empty `default_context:`, a blank string left by an editor).
//! Before the `generator` section is staged for the engine, those are
//! removed: a key survives only if its value, after pruning its own
//! children, is still non-empty.
//!
//! Empty means null, `""`, `{}`, or `[]`. `false` and `0` are kept, so
//! boolean and numeric defaults remain expressible.

use serde_yaml::{Mapping, Value};

/// Prune empty values from a YAML value.
///
/// Returns `None` when the value itself is empty after pruning.
pub fn prune_empty(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Mapping(map) => {
            let pruned: Mapping = map
                .iter()
                .filter_map(|(k, v)| prune_empty(v).map(|v| (k.clone(), v)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Mapping(pruned))
            }
        }
        Value::Sequence(seq) => {
            let pruned: Vec<Value> = seq.iter().filter_map(prune_empty).collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Sequence(pruned))
            }
        }
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn prunes_empty_strings_and_nulls() {
        let value = yaml(
            r#"
author: Jane
email: ""
license: null
"#,
        );

        let pruned = prune_empty(&value).unwrap();
        let map = pruned.as_mapping().unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(pruned["author"], Value::String("Jane".into()));
    }

    #[test]
    fn mapping_empty_after_pruning_is_removed() {
        let value = yaml(
            r#"
default_context:
  author: ""
  nested:
    inner: ""
"#,
        );

        assert!(prune_empty(&value).is_none());
    }

    #[test]
    fn nested_survivor_keeps_its_branch() {
        let value = yaml(
            r#"
default_context:
  author: ""
  nested:
    inner: keep
"#,
        );

        let pruned = prune_empty(&value).unwrap();
        assert_eq!(
            pruned["default_context"]["nested"]["inner"],
            Value::String("keep".into())
        );
        assert!(pruned["default_context"].get("author").is_none());
    }

    #[test]
    fn false_and_zero_survive() {
        let value = yaml(
            r#"
flag: false
count: 0
"#,
        );

        let pruned = prune_empty(&value).unwrap();
        assert_eq!(pruned["flag"], Value::Bool(false));
        assert_eq!(pruned["count"], yaml("0"));
    }

    #[test]
    fn empty_sequence_is_removed() {
        let value = yaml("items: []");
        assert!(prune_empty(&value).is_none());
    }

    #[test]
    fn scalar_passes_through() {
        let value = yaml("hello");
        assert_eq!(prune_empty(&value), Some(Value::String("hello".into())));
    }
}
