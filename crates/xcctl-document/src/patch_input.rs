//! Decoding of user-supplied patch text.
//!
//! Patches arrive as JSON or YAML from a file, standard input, or an inline
//! flag. A merge patch must decode to an object; a pointer patch must decode
//! to a list of `{op, path, value}` entries.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{PatchError, PatchInputError};
use crate::merge::merge;
use crate::pointer::{PatchOperation, apply};
use crate::value::{Map, Value};

/// Which engine a patch targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PatchType {
    /// Recursive merge patch. `strategic` is accepted as an alias.
    #[default]
    #[strum(to_string = "merge", serialize = "strategic")]
    Merge,
    /// Pointer patch: a list of add/remove/replace operations.
    #[strum(to_string = "json")]
    Json,
}

/// A decoded patch, ready to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatchInput {
    /// A merge patch object.
    Merge(Map),
    /// An ordered list of pointer operations.
    Json(Vec<PatchOperation>),
}

impl PatchInput {
    /// Decodes `text` according to `patch_type`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchInputError`] when the text is not JSON or YAML, when a
    /// merge patch is not an object, or when an operation entry is malformed
    /// (missing `op` or `path`, or an unknown `op`).
    pub fn parse(text: &str, patch_type: PatchType) -> Result<Self, PatchInputError> {
        match patch_type {
            PatchType::Merge => match Value::parse_text(text)? {
                Value::Object(map) => Ok(Self::Merge(map)),
                other => Err(PatchInputError::NotAnObject { kind: other.kind() }),
            },
            PatchType::Json => parse_operations(text).map(Self::Json),
        }
    }

    /// Applies the patch to `document`, returning the new document.
    ///
    /// # Errors
    ///
    /// Merge patches never fail; pointer patches propagate the first
    /// [`PatchError`], in which case no operation takes effect.
    pub fn apply_to(&self, document: &Map) -> Result<Map, PatchError> {
        match self {
            Self::Merge(patch) => Ok(merge(document, patch)),
            Self::Json(operations) => apply(document, operations),
        }
    }
}

fn parse_operations(text: &str) -> Result<Vec<PatchOperation>, PatchInputError> {
    serde_json::from_str(text).or_else(|_json_error| {
        serde_saphyr::from_str(text).map_err(|yaml_error| PatchInputError::Operations {
            message: yaml_error.to_string(),
        })
    })
}
