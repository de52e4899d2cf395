//! Document model for etchdb
//!
//! A document is a schemaless JSON object with two reserved fields:
//!
//! - `_id`: the document identity, any JSON value, immutable once written
//! - `_etag`: the server-managed version token, rewritten on every mutation
//!
//! Callers never set `_etag` themselves; the repository overwrites whatever
//! they supply before the store sees the document.

mod etag;

pub use etag::{Etag, EtagParseError};

use serde_json::{Map, Value};

/// Identity field name
pub const ID_FIELD: &str = "_id";

/// Version token field name
pub const ETAG_FIELD: &str = "_etag";

/// A document body: an ordered JSON object
pub type Document = Map<String, Value>;

/// Canonical string encoding of a document identity.
///
/// Identities may be any JSON value (string, number, nested object), so the
/// stores key collections by the identity's JSON encoding rather than by the
/// value itself.
pub fn id_key(id: &Value) -> String {
    serde_json::to_string(id).expect("JSON value serialization cannot fail")
}

/// Reads the version token stored on a document, if any.
///
/// Returns `None` both when the field is absent (never-versioned document)
/// and when it holds something that is not a well-formed token.
pub fn etag_of(document: &Document) -> Option<Etag> {
    etag_str_of(document).and_then(|s| s.parse().ok())
}

/// Renders the stored `_etag` field as a string for comparison.
///
/// Tokens written by this layer are strings already; anything else (a legacy
/// document versioned by another system) is rendered through its JSON
/// encoding so the comparison never panics.
pub fn etag_str_of(document: &Document) -> Option<String> {
    match document.get(ETAG_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(id_key(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_id_key_distinguishes_types() {
        // the string "1" and the number 1 are different identities
        assert_ne!(id_key(&json!("1")), id_key(&json!(1)));
        assert_eq!(id_key(&json!("a")), id_key(&json!("a")));
    }

    #[test]
    fn test_etag_of_absent() {
        let doc = as_doc(json!({"_id": 1, "a": 1}));
        assert!(etag_of(&doc).is_none());
        assert!(etag_str_of(&doc).is_none());
    }

    #[test]
    fn test_etag_of_roundtrip() {
        let etag = Etag::new();
        let doc = as_doc(json!({"_id": 1, "_etag": etag.to_string()}));
        assert_eq!(etag_of(&doc), Some(etag));
    }

    #[test]
    fn test_etag_str_of_legacy_value() {
        // a numeric etag written by some other system still renders
        let doc = as_doc(json!({"_id": 1, "_etag": 42}));
        assert_eq!(etag_str_of(&doc), Some("42".to_string()));
        assert!(etag_of(&doc).is_none());
    }

    #[test]
    fn test_null_etag_treated_as_unversioned() {
        let doc = as_doc(json!({"_id": 1, "_etag": null}));
        assert!(etag_str_of(&doc).is_none());
    }
}
