//! Label selectors over a document's flattened label map.

use std::collections::BTreeMap;

use tracing::debug;

use super::{Selector, split_top_level};
use crate::value::Value;

/// Comparison applied by a [`LabelCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOperator {
    /// `key=value` or `key==value`: present with exactly this value.
    Equals,
    /// `key!=value`: absent, or present with another value.
    NotEquals,
    /// `key in (a,b)`: present with one of the listed values.
    In,
    /// `key notin (a,b)`: absent, or present with none of the listed values.
    NotIn,
    /// `key`: present with any value.
    Exists,
    /// `!key`: absent.
    NotExists,
}

/// One clause of a label selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCondition {
    /// The label key.
    pub key: String,
    /// The comparison.
    pub operator: LabelOperator,
    /// Operand values; empty for existence checks.
    pub values: Vec<String>,
}

impl LabelCondition {
    /// Parses a single clause. Returns `None` when no key can be found.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let clause = raw.trim();
        if clause.is_empty() {
            return None;
        }
        let condition = if let Some((key, values)) = set_clause(clause, " in") {
            Self::new(key, LabelOperator::In, values)
        } else if let Some((key, values)) = set_clause(clause, " notin") {
            Self::new(key, LabelOperator::NotIn, values)
        } else if let Some(key) = clause.strip_prefix('!') {
            Self::new(key, LabelOperator::NotExists, Vec::new())
        } else if let Some((key, value)) = clause.split_once("!=") {
            Self::new(key, LabelOperator::NotEquals, vec![value.trim().to_owned()])
        } else if let Some((key, value)) = clause.split_once("==") {
            Self::new(key, LabelOperator::Equals, vec![value.trim().to_owned()])
        } else if let Some((key, value)) = clause.split_once('=') {
            Self::new(key, LabelOperator::Equals, vec![value.trim().to_owned()])
        } else {
            Self::new(clause, LabelOperator::Exists, Vec::new())
        };
        (!condition.key.is_empty()).then_some(condition)
    }

    fn new(key: &str, operator: LabelOperator, values: Vec<String>) -> Self {
        Self {
            key: key.trim().to_owned(),
            operator,
            values,
        }
    }

    /// Evaluates the clause against a flattened label map.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let value = labels.get(&self.key);
        let first = self.values.first();
        match self.operator {
            LabelOperator::Equals => matches!((value, first), (Some(v), Some(f)) if v == f),
            LabelOperator::NotEquals => match (value, first) {
                (None, _) => true,
                (Some(v), Some(f)) => v != f,
                (Some(_), None) => false,
            },
            LabelOperator::In => value.is_some_and(|v| self.values.contains(v)),
            LabelOperator::NotIn => value.is_none_or(|v| !self.values.contains(v)),
            LabelOperator::Exists => value.is_some(),
            LabelOperator::NotExists => value.is_none(),
        }
    }
}

/// Recognises `key in (a, b)` style clauses for the given keyword, with or
/// without a space before the parenthesis.
fn set_clause<'a>(clause: &'a str, keyword: &str) -> Option<(&'a str, Vec<String>)> {
    let spaced = format!("{keyword} (");
    let tight = format!("{keyword}(");
    if !clause.contains(&spaced) && !clause.contains(&tight) {
        return None;
    }
    let (key, rest) = clause.split_once(keyword)?;
    let list = rest.trim_matches(|ch: char| ch == ' ' || ch == '(' || ch == ')');
    let values = list.split(',').map(|v| v.trim().to_owned()).collect();
    Some((key, values))
}

/// A parsed label selector such as `env in (prod,staging),!owner`.
///
/// # Example
///
/// ```
/// use xcctl_document::{LabelSelector, Selector, Value};
///
/// let selector = LabelSelector::parse("env in (prod,staging),!owner");
/// let doc = Value::parse_text(r#"{"metadata":{"labels":{"env":"prod"}}}"#)
///     .expect("valid JSON");
/// assert!(selector.matches(&doc));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    conditions: Vec<LabelCondition>,
}

impl LabelSelector {
    /// Parses a comma-separated selector, keeping parenthesised value lists
    /// intact. Clauses without a key are dropped.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        let conditions = split_top_level(selector)
            .into_iter()
            .filter_map(|clause| {
                let parsed = LabelCondition::parse(clause);
                if parsed.is_none() && !clause.trim().is_empty() {
                    debug!(clause, "dropping unparsable label selector clause");
                }
                parsed
            })
            .collect();
        Self { conditions }
    }

    /// Returns the parsed clauses.
    #[must_use]
    pub fn conditions(&self) -> &[LabelCondition] {
        &self.conditions
    }
}

impl Selector for LabelSelector {
    fn matches(&self, document: &Value) -> bool {
        let labels = labels_of(document);
        self.conditions
            .iter()
            .all(|condition| condition.matches(&labels))
    }

    fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Flattens a document's labels into strings.
///
/// Entries come from `metadata.labels` and then from a top-level `labels`
/// object, the latter winning on a shared key. Non-string values use their
/// rendered form.
#[must_use]
pub fn labels_of(document: &Value) -> BTreeMap<String, String> {
    let nested = document.get("metadata").and_then(|meta| meta.get("labels"));
    let top_level = document.get("labels");
    [nested, top_level]
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .flat_map(|labels| labels.iter())
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}
