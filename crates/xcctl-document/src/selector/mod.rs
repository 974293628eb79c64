//! Label and field selectors applied to documents that were already fetched.
//!
//! Both selectors act as a client-side fallback: the list command first
//! retrieves documents from the remote service (which may or may not honour
//! the selector itself) and only then prunes them here, one document at a
//! time. Every parsed condition must hold for a document to be kept.
//!
//! Clauses that cannot be parsed are dropped with a debug event rather than
//! reported, so a typo widens the filter instead of failing the command.

mod field;
mod label;

pub use field::{FieldCondition, FieldOperator, FieldSelector};
pub use label::{LabelCondition, LabelOperator, LabelSelector, labels_of};

use crate::value::Value;

/// A predicate over a single document.
pub trait Selector {
    /// Returns `true` when `document` satisfies every condition.
    fn matches(&self, document: &Value) -> bool;

    /// Returns `true` when no condition survived parsing. An empty selector
    /// leaves lists untouched.
    fn is_empty(&self) -> bool;
}

/// Prunes the `items` array of a list document with `selector`.
///
/// Documents without an `items` array, and empty selectors, pass through
/// unchanged. Otherwise only object items that match are kept; all other
/// fields of the list document are preserved.
#[must_use]
pub fn filter_items<S>(list: &Value, selector: &S) -> Value
where
    S: Selector + ?Sized,
{
    if selector.is_empty() {
        return list.clone();
    }
    let Value::Object(fields) = list else {
        return list.clone();
    };
    let Some(Value::Array(items)) = fields.get("items") else {
        return list.clone();
    };
    let kept: Vec<Value> = items
        .iter()
        .filter(|item| matches!(item, Value::Object(_)) && selector.matches(item))
        .cloned()
        .collect();
    let mut filtered = fields.clone();
    filtered.insert(String::from("items"), Value::Array(kept));
    Value::Object(filtered)
}

/// Splits on commas that are not nested inside parentheses.
pub(crate) fn split_top_level(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (offset, ch) in selector.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                if let Some(part) = selector.get(start..offset) {
                    parts.push(part);
                }
                start = offset + 1;
            }
            _ => {}
        }
    }
    if let Some(part) = selector.get(start..).filter(|part| !part.is_empty()) {
        parts.push(part);
    }
    parts
}
