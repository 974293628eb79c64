//! Whole-subtree merge patches.
//!
//! A merge patch mirrors the shape of the document it updates. Objects merge
//! key by key, a `null` value deletes the key, and anything else (arrays
//! included) replaces the base value wholesale. There is no way to set a key
//! to a literal `null`.

use crate::value::{Map, Value};

/// Merges `patch` into a copy of `base`.
///
/// When the patch holds an object where the base holds something else (or
/// nothing), the object is merged into an empty object, so tombstones nested
/// inside it never materialise as literal nulls and re-applying the patch is
/// a no-op.
///
/// # Example
///
/// ```
/// use xcctl_document::{Value, merge};
///
/// let base = Value::parse_text(r#"{"spec":{"port":80,"tls":true},"owner":"ops"}"#)
///     .expect("valid JSON");
/// let patch = Value::parse_text(r#"{"spec":{"port":8080},"owner":null}"#)
///     .expect("valid JSON");
/// let (Some(base), Some(patch)) = (base.as_object(), patch.as_object()) else {
///     unreachable!("both documents are objects");
/// };
/// let merged = Value::Object(merge(base, patch));
/// assert_eq!(merged.to_string(), "map[spec:map[port:8080 tls:true]]");
/// ```
#[must_use]
pub fn merge(base: &Map, patch: &Map) -> Map {
    let mut result = base.clone();
    for (key, patch_value) in patch {
        match patch_value {
            Value::Null => {
                result.remove(key);
            }
            Value::Object(patch_child) => {
                let merged = match result.get(key) {
                    Some(Value::Object(base_child)) => merge(base_child, patch_child),
                    _ => merge(&Map::new(), patch_child),
                };
                result.insert(key.clone(), Value::Object(merged));
            }
            replacement => {
                result.insert(key.clone(), replacement.clone());
            }
        }
    }
    result
}
