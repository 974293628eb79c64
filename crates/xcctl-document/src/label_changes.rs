//! Label and annotation change sets expressed as merge patches.

use crate::error::LabelChangeError;
use crate::value::{Map, Value};

/// The string map under `metadata` that a change set targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    /// `metadata.labels`.
    Labels,
    /// `metadata.annotations`.
    Annotations,
}

impl MetadataField {
    /// Returns the key of the map under `metadata`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::Annotations => "annotations",
        }
    }

    /// Returns the current map of `document`, if it has one.
    #[must_use]
    pub fn current(self, document: &Map) -> Option<&Map> {
        document.get("metadata")?.get(self.key())?.as_object()
    }
}

/// One requested label or annotation change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelChange {
    /// `key=value`: set the label.
    Set {
        /// Label key.
        key: String,
        /// New value.
        value: String,
    },
    /// `key-`: remove the label.
    Remove {
        /// Label key.
        key: String,
    },
}

impl LabelChange {
    /// Returns the key this change targets.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// An ordered set of label or annotation changes from the command line.
///
/// # Example
///
/// ```
/// use xcctl_document::{LabelChanges, MetadataField, Value};
///
/// let changes = LabelChanges::parse(["env=prod", "owner-"]).expect("valid changes");
/// let patch = Value::Object(changes.to_merge_patch(MetadataField::Labels));
/// assert_eq!(patch.to_string(), "map[metadata:map[labels:map[env:prod owner:]]]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelChanges {
    changes: Vec<LabelChange>,
}

impl LabelChanges {
    /// Parses `key=value` and `key-` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`LabelChangeError`] naming the first argument that fits
    /// neither form or has an empty key.
    pub fn parse<I, S>(arguments: I) -> Result<Self, LabelChangeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changes = arguments
            .into_iter()
            .map(|argument| parse_change(argument.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { changes })
    }

    /// Returns the changes in argument order.
    #[must_use]
    pub fn changes(&self) -> &[LabelChange] {
        &self.changes
    }

    /// Returns `true` when no change was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the keys this set assigns that already exist in `current`,
    /// in argument order.
    #[must_use]
    pub fn assigned_existing<'a>(&'a self, current: Option<&Map>) -> Vec<&'a str> {
        let Some(current) = current else {
            return Vec::new();
        };
        self.changes
            .iter()
            .filter_map(|change| match change {
                LabelChange::Set { key, .. } if current.contains_key(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Builds `{metadata: {<field>: {...}}}` where removals are `null`
    /// tombstones. A later change to the same key wins.
    #[must_use]
    pub fn to_merge_patch(&self, field: MetadataField) -> Map {
        let entries: Map = self
            .changes
            .iter()
            .map(|change| match change {
                LabelChange::Set { key, value } => (key.clone(), Value::from(value.as_str())),
                LabelChange::Remove { key } => (key.clone(), Value::Null),
            })
            .collect();
        let mut metadata = Map::new();
        metadata.insert(String::from(field.key()), Value::Object(entries));
        let mut patch = Map::new();
        patch.insert(String::from("metadata"), Value::Object(metadata));
        patch
    }
}

fn parse_change(argument: &str) -> Result<LabelChange, LabelChangeError> {
    let invalid = || LabelChangeError {
        argument: argument.to_owned(),
    };
    if let Some((key, value)) = argument.split_once('=') {
        if key.is_empty() {
            return Err(invalid());
        }
        return Ok(LabelChange::Set {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }
    match argument.strip_suffix('-') {
        Some(key) if !key.is_empty() => Ok(LabelChange::Remove {
            key: key.to_owned(),
        }),
        _ => Err(invalid()),
    }
}
