//! Error types for the fallible parts of the document engines.
//!
//! Reads never fail: the path evaluator resolves dead ends to `Null` and the
//! merge engine accepts any pair of objects. Only decoding, pointer patching,
//! and the small input grammars built on top of them report errors.

use std::fmt;

use thiserror::Error;

use crate::pointer::PatchOp;

/// Text could not be decoded as either JSON or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode document as JSON or YAML: {message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub(crate) fn new(cause: &impl fmt::Display) -> Self {
        Self {
            message: cause.to_string(),
        }
    }

    /// Returns the decoder's description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failures raised by the pointer patch engine.
///
/// Any of these aborts the whole patch. The caller's document is never
/// modified, so there is nothing to roll back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// The pointer is empty or has a token that cannot address anything.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The pointer as supplied.
        path: String,
        /// Why the pointer was rejected.
        reason: String,
    },
    /// A key or intermediate container the operation needs is absent.
    #[error("path '{path}' does not exist")]
    PathNotFound {
        /// The pointer as supplied.
        path: String,
    },
    /// A literal array index lies outside the array.
    #[error("array index {index} is out of range at '{path}' (length {len})")]
    IndexOutOfRange {
        /// The pointer as supplied.
        path: String,
        /// The offending index.
        index: usize,
        /// Length of the array at that location.
        len: usize,
    },
    /// The operation cannot be applied at this location.
    #[error("cannot {op} at '{path}': {reason}")]
    InvalidOperation {
        /// The operation being applied.
        op: PatchOp,
        /// The pointer as supplied.
        path: String,
        /// Why the operation was rejected.
        reason: String,
    },
    /// `copy`, `move`, and `test` are recognised but not implemented.
    #[error("patch operation '{op}' is not supported")]
    UnsupportedOp {
        /// The rejected operation.
        op: PatchOp,
    },
}

/// Failures decoding user-supplied patch text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatchInputError {
    /// The text is not valid JSON or YAML.
    #[error("failed to parse patch: {0}")]
    Decode(#[from] DecodeError),
    /// A merge patch must be an object.
    #[error("merge patch must be an object, found {kind}")]
    NotAnObject {
        /// Kind of the decoded value.
        kind: &'static str,
    },
    /// The operation list is malformed.
    #[error("failed to parse JSON patch: {message}")]
    Operations {
        /// The decoder's description of the failure.
        message: String,
    },
}

/// A label change argument was neither `key=value` nor `key-`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid label format: {argument} (expected key=value or key-)")]
pub struct LabelChangeError {
    /// The offending argument.
    pub argument: String,
}

/// A wait condition string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConditionError {
    /// A `jsonpath=` condition lacked the `=value` part.
    #[error("invalid jsonpath expression: {expression} (expected jsonpath='{{.path.to.field}}'=value)")]
    MissingExpectedValue {
        /// The expression after `jsonpath=`.
        expression: String,
    },
    /// A `condition=` form named nothing.
    #[error("condition name must not be empty")]
    EmptyConditionName,
    /// The condition used none of the supported forms.
    #[error("invalid --for value: {spec} (valid values: delete, condition=<name>, jsonpath=<expr>=<value>)")]
    Unrecognised {
        /// The condition as supplied.
        spec: String,
    },
}
