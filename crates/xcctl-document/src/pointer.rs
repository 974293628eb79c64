//! Pointer-addressed patch operations (`add`, `remove`, `replace`).
//!
//! Each operation names exactly one location with a slash-delimited pointer.
//! Tokens are taken verbatim; a token is read as an object key or an array
//! index depending on the container it meets, and `-` is the append marker
//! when it is the last token of an `add`.
//!
//! [`apply`] works on a private copy of the caller's object and hands it back
//! only when every operation succeeded, so a failed patch can never leak a
//! partially modified document.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::PatchError;
use crate::value::{Map, Value};

/// The operation named by a patch entry's `op` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatchOp {
    /// Insert or overwrite a key, insert at an index, or append with `-`.
    Add,
    /// Delete an existing key or array element.
    Remove,
    /// Overwrite an existing key or array element.
    Replace,
    /// Recognised but unsupported.
    Copy,
    /// Recognised but unsupported.
    Move,
    /// Recognised but unsupported.
    Test,
}

/// One entry of a pointer patch.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatchOperation {
    /// The operation to perform.
    pub op: PatchOp,
    /// Slash-delimited pointer to the target location.
    pub path: String,
    /// The value for `add` and `replace`. An explicit `null` is kept as
    /// `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

impl PatchOperation {
    /// Builds an `add` operation.
    #[must_use]
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value: Some(value),
        }
    }

    /// Builds a `remove` operation.
    #[must_use]
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
        }
    }

    /// Builds a `replace` operation.
    #[must_use]
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: Some(value),
        }
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A parsed pointer: the raw tokens between slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    raw: String,
    tokens: Vec<String>,
}

impl Pointer {
    /// Splits `path` on `/` after dropping one leading slash.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidPath`] for an empty pointer or `/`,
    /// which would target the root.
    pub fn parse(path: &str) -> Result<Self, PatchError> {
        let body = path.strip_prefix('/').unwrap_or(path);
        if body.is_empty() {
            return Err(PatchError::InvalidPath {
                path: path.to_owned(),
                reason: String::from("cannot target the document root"),
            });
        }
        Ok(Self {
            raw: path.to_owned(),
            tokens: body.split('/').map(str::to_owned).collect(),
        })
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the pointer as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Applies `operations` in order to a copy of `root`.
///
/// # Errors
///
/// Returns the first [`PatchError`] raised. The whole patch is abandoned and
/// `root` is left as it was.
///
/// # Example
///
/// ```
/// use xcctl_document::{Map, PatchOperation, Value, apply};
///
/// let mut doc = Map::new();
/// doc.insert(String::from("ports"), Value::from(vec![Value::from(80_i64)]));
/// let patched = apply(&doc, &[PatchOperation::add("/ports/-", Value::from(443_i64))])
///     .expect("append succeeds");
/// assert_eq!(
///     patched.get("ports"),
///     Some(&Value::from(vec![Value::from(80_i64), Value::from(443_i64)]))
/// );
/// assert_eq!(doc.get("ports").and_then(Value::as_array).map(<[Value]>::len), Some(1));
/// ```
pub fn apply(root: &Map, operations: &[PatchOperation]) -> Result<Map, PatchError> {
    let mut working = Value::Object(root.clone());
    for operation in operations {
        apply_operation(&mut working, operation)?;
        debug!(op = %operation.op, path = %operation.path, "applied patch operation");
    }
    match working {
        Value::Object(map) => Ok(map),
        // Tokens can never address the root, so the root stays an object.
        _ => Ok(Map::new()),
    }
}

fn apply_operation(document: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    let op = operation.op;
    if matches!(op, PatchOp::Copy | PatchOp::Move | PatchOp::Test) {
        return Err(PatchError::UnsupportedOp { op });
    }
    let pointer = Pointer::parse(&operation.path)?;
    let value = match op {
        PatchOp::Remove => None,
        _ => Some(
            operation
                .value
                .clone()
                .ok_or_else(|| PatchError::InvalidOperation {
                    op,
                    path: pointer.as_str().to_owned(),
                    reason: String::from("a value is required"),
                })?,
        ),
    };

    let Some((last, parents)) = pointer.tokens().split_last() else {
        return Err(PatchError::InvalidPath {
            path: pointer.as_str().to_owned(),
            reason: String::from("cannot target the document root"),
        });
    };
    let mut current = document;
    for token in parents {
        current = descend(current, token, op, &pointer)?;
    }
    match value {
        Some(value) if op == PatchOp::Add => add_at(current, last, value, &pointer),
        Some(value) => replace_at(current, last, value, &pointer),
        None => remove_at(current, last, &pointer),
    }
}

/// Steps through one non-terminal token. Only `add` creates a missing
/// intermediate object.
fn descend<'a>(
    current: &'a mut Value,
    token: &str,
    op: PatchOp,
    pointer: &Pointer,
) -> Result<&'a mut Value, PatchError> {
    match current {
        Value::Object(map) => {
            if !map.contains_key(token) {
                if op != PatchOp::Add {
                    return Err(not_found(pointer));
                }
                map.insert(token.to_owned(), Value::Object(Map::new()));
            }
            map.get_mut(token).ok_or_else(|| not_found(pointer))
        }
        Value::Array(items) => {
            if token == "-" {
                return Err(invalid_operation(
                    op,
                    pointer,
                    "'-' may only be the final token of an add",
                ));
            }
            let index = parse_index(token, pointer)?;
            let len = items.len();
            items
                .get_mut(index)
                .ok_or_else(|| out_of_range(pointer, index, len))
        }
        scalar => Err(invalid_path(
            pointer,
            &format!("cannot traverse into {} at '{token}'", scalar.kind()),
        )),
    }
}

fn add_at(
    parent: &mut Value,
    token: &str,
    value: Value,
    pointer: &Pointer,
) -> Result<(), PatchError> {
    match parent {
        Value::Object(map) => {
            map.insert(token.to_owned(), value);
            Ok(())
        }
        Value::Array(items) => {
            if token == "-" {
                items.push(value);
                return Ok(());
            }
            let index = parse_index(token, pointer)?;
            if index > items.len() {
                return Err(out_of_range(pointer, index, items.len()));
            }
            items.insert(index, value);
            Ok(())
        }
        scalar => Err(invalid_path(
            pointer,
            &format!("cannot add into {}", scalar.kind()),
        )),
    }
}

fn replace_at(
    parent: &mut Value,
    token: &str,
    value: Value,
    pointer: &Pointer,
) -> Result<(), PatchError> {
    let slot = existing_slot(parent, token, PatchOp::Replace, pointer)?;
    *slot = value;
    Ok(())
}

fn remove_at(parent: &mut Value, token: &str, pointer: &Pointer) -> Result<(), PatchError> {
    match parent {
        Value::Object(map) => map.remove(token).map(drop).ok_or_else(|| not_found(pointer)),
        Value::Array(items) => {
            let index = array_index(token, PatchOp::Remove, pointer)?;
            if index >= items.len() {
                return Err(out_of_range(pointer, index, items.len()));
            }
            items.remove(index);
            Ok(())
        }
        scalar => Err(invalid_path(
            pointer,
            &format!("cannot remove from {}", scalar.kind()),
        )),
    }
}

fn existing_slot<'a>(
    parent: &'a mut Value,
    token: &str,
    op: PatchOp,
    pointer: &Pointer,
) -> Result<&'a mut Value, PatchError> {
    match parent {
        Value::Object(map) => map.get_mut(token).ok_or_else(|| not_found(pointer)),
        Value::Array(items) => {
            let index = array_index(token, op, pointer)?;
            let len = items.len();
            items
                .get_mut(index)
                .ok_or_else(|| out_of_range(pointer, index, len))
        }
        scalar => Err(invalid_path(
            pointer,
            &format!("cannot {op} inside {}", scalar.kind()),
        )),
    }
}

/// Parses a terminal array token for `remove`/`replace`, where `-` names no
/// existing element.
fn array_index(token: &str, op: PatchOp, pointer: &Pointer) -> Result<usize, PatchError> {
    if token == "-" {
        return Err(invalid_operation(
            op,
            pointer,
            "'-' is only valid for add",
        ));
    }
    parse_index(token, pointer)
}

fn parse_index(token: &str, pointer: &Pointer) -> Result<usize, PatchError> {
    token
        .parse::<usize>()
        .map_err(|_| invalid_path(pointer, &format!("'{token}' is not an array index")))
}

fn not_found(pointer: &Pointer) -> PatchError {
    PatchError::PathNotFound {
        path: pointer.as_str().to_owned(),
    }
}

fn out_of_range(pointer: &Pointer, index: usize, len: usize) -> PatchError {
    PatchError::IndexOutOfRange {
        path: pointer.as_str().to_owned(),
        index,
        len,
    }
}

fn invalid_path(pointer: &Pointer, reason: &str) -> PatchError {
    PatchError::InvalidPath {
        path: pointer.as_str().to_owned(),
        reason: reason.to_owned(),
    }
}

fn invalid_operation(op: PatchOp, pointer: &Pointer, reason: &str) -> PatchError {
    PatchError::InvalidOperation {
        op,
        path: pointer.as_str().to_owned(),
        reason: reason.to_owned(),
    }
}
