//! Filter matching for bulk write models
//!
//! Filters are JSON objects mapping a field name either to a literal (exact
//! equality, no coercion) or to an operator object such as
//! `{"$gte": 21}`. Supported operators: `$eq`, `$gt`, `$gte`, `$lt`,
//! `$lte`. All filter entries must match (AND semantics); an unknown
//! operator or a missing field never matches.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::Document;

/// Evaluates filter documents against stored documents
pub struct FilterMatcher;

impl FilterMatcher {
    /// Checks whether a document matches every entry of the filter.
    pub fn matches(document: &Document, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(field, condition)| Self::matches_field(document.get(field), condition))
    }

    fn matches_field(actual: Option<&Value>, condition: &Value) -> bool {
        match condition {
            Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                let actual = match actual {
                    Some(v) if !v.is_null() => v,
                    _ => return false,
                };
                ops.iter().all(|(op, bound)| Self::matches_op(actual, op, bound))
            }
            literal => actual.is_some_and(|v| v == literal),
        }
    }

    fn matches_op(actual: &Value, op: &str, bound: &Value) -> bool {
        match op {
            "$eq" => actual == bound,
            "$gt" => Self::compare(actual, bound) == Some(Ordering::Greater),
            "$gte" => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            "$lt" => Self::compare(actual, bound) == Some(Ordering::Less),
            "$lte" => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            _ => false,
        }
    }

    /// Orders two JSON values when they are comparable (both numbers or
    /// both strings). Mixed types have no order and never match.
    fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return Some(ai.cmp(&bi));
                }
                let (af, bf) = (a.as_f64()?, b.as_f64()?);
                af.partial_cmp(&bf)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
