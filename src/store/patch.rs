//! Patch application for partial updates
//!
//! A patch is a JSON object whose fields are merged into the target at the
//! top level: present fields are overwritten, absent fields are added, and
//! fields not named by the patch are left alone. The identity field is
//! immutable and silently skipped.

use crate::document::{Document, ID_FIELD};

/// Merges `patch` into `document`, returning whether anything changed.
pub fn apply_patch(document: &mut Document, patch: &Document) -> bool {
    let mut changed = false;
    for (field, value) in patch {
        if field == ID_FIELD {
            continue;
        }
        if document.get(field) != Some(value) {
            document.insert(field.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_overwrites_and_adds() {
        let mut d = doc(json!({"_id": 1, "a": 1, "b": 2}));
        let changed = apply_patch(&mut d, &doc(json!({"a": 10, "c": 3})));
        assert!(changed);
        assert_eq!(d, doc(json!({"_id": 1, "a": 10, "b": 2, "c": 3})));
    }

    #[test]
    fn test_identity_is_immutable() {
        let mut d = doc(json!({"_id": 1, "a": 1}));
        apply_patch(&mut d, &doc(json!({"_id": 99, "a": 2})));
        assert_eq!(d["_id"], json!(1));
        assert_eq!(d["a"], json!(2));
    }

    #[test]
    fn test_noop_patch_reports_unchanged() {
        let mut d = doc(json!({"_id": 1, "a": 1}));
        assert!(!apply_patch(&mut d, &doc(json!({"a": 1}))));
        assert!(!apply_patch(&mut d, &doc(json!({}))));
    }

    #[test]
    fn test_nested_values_replace_wholesale() {
        // top-level merge: nested objects are replaced, not merged
        let mut d = doc(json!({"_id": 1, "meta": {"x": 1, "y": 2}}));
        apply_patch(&mut d, &doc(json!({"meta": {"x": 9}})));
        assert_eq!(d["meta"], json!({"x": 9}));
    }
}
