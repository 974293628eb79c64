//! Field selectors comparing a path's rendered value with a literal.

use tracing::debug;

use super::Selector;
use crate::path::DotPath;
use crate::value::Value;

/// Comparison applied by a [`FieldCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOperator {
    /// `path=value`: the field is present and renders as `value`.
    Equals,
    /// `path!=value`: the field is absent or renders as something else.
    NotEquals,
}

/// One clause of a field selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCondition {
    /// The dot-path to resolve.
    pub path: DotPath,
    /// The path as written, kept for diagnostics.
    pub raw_path: String,
    /// The comparison.
    pub operator: FieldOperator,
    /// The literal to compare against.
    pub value: String,
}

impl FieldCondition {
    /// Parses `path=value` or `path!=value`. Returns `None` when there is no
    /// operator or the path is empty.
    #[must_use]
    pub fn parse(clause: &str) -> Option<Self> {
        let (path, operator, value) = if let Some((path, value)) = clause.split_once("!=") {
            (path, FieldOperator::NotEquals, value)
        } else if let Some((path, value)) = clause.split_once('=') {
            (path, FieldOperator::Equals, value)
        } else {
            return None;
        };
        let raw_path = path.trim();
        if raw_path.is_empty() {
            return None;
        }
        Some(Self {
            path: DotPath::parse(raw_path),
            raw_path: raw_path.to_owned(),
            operator,
            value: value.trim().to_owned(),
        })
    }

    /// Evaluates the clause against a document.
    ///
    /// The path resolves to its first match only; a `null` field counts as
    /// absent.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        let resolved = self.path.resolve(document);
        match self.operator {
            FieldOperator::Equals => resolved.is_some_and(|field| field.to_string() == self.value),
            FieldOperator::NotEquals => {
                resolved.is_none_or(|field| field.to_string() != self.value)
            }
        }
    }
}

/// A parsed field selector such as `metadata.namespace=default`.
///
/// Clauses are separated by plain commas; there is no grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    conditions: Vec<FieldCondition>,
}

impl FieldSelector {
    /// Parses a comma-separated selector, dropping clauses without an
    /// operator or a path.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        let conditions = selector
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .filter_map(|clause| {
                let parsed = FieldCondition::parse(clause);
                if parsed.is_none() {
                    debug!(clause, "dropping unparsable field selector clause");
                }
                parsed
            })
            .collect();
        Self { conditions }
    }

    /// Returns the parsed clauses.
    #[must_use]
    pub fn conditions(&self) -> &[FieldCondition] {
        &self.conditions
    }
}

impl Selector for FieldSelector {
    fn matches(&self, document: &Value) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(document))
    }

    fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
