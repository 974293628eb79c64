//! Conditions the `wait` command polls for.
//!
//! A condition is checked against the latest observation of a document. The
//! path evaluator never fails, so a field that has not appeared yet simply
//! reads as `Null` and the condition stays unmet until the next poll.

use std::fmt;

use crate::error::ConditionError;
use crate::path::DotPath;
use crate::value::Value;

/// A parsed `--for` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// `delete`: the document no longer exists.
    Delete,
    /// `condition=<name>`: a status condition is `True`, or the reported
    /// state equals the name.
    Condition(String),
    /// `jsonpath=<expr>=<value>`: the expression renders as `expected`.
    JsonPath {
        /// The expression with quotes and braces stripped.
        expression: String,
        /// The parsed expression.
        path: DotPath,
        /// The literal the rendered value must equal.
        expected: String,
    },
}

impl WaitCondition {
    /// Parses a condition string.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError`] for an unknown form, an empty condition
    /// name, or a `jsonpath=` form without `=value`.
    pub fn parse(spec: &str) -> Result<Self, ConditionError> {
        if spec == "delete" {
            return Ok(Self::Delete);
        }
        if let Some(name) = spec.strip_prefix("condition=") {
            if name.trim().is_empty() {
                return Err(ConditionError::EmptyConditionName);
            }
            return Ok(Self::Condition(name.trim().to_owned()));
        }
        if let Some(body) = spec.strip_prefix("jsonpath=") {
            let Some((raw_expression, expected)) = body.split_once('=') else {
                return Err(ConditionError::MissingExpectedValue {
                    expression: body.to_owned(),
                });
            };
            let expression =
                raw_expression.trim_matches(|ch: char| matches!(ch, '\'' | '"' | '{' | '}'));
            return Ok(Self::JsonPath {
                expression: expression.to_owned(),
                path: DotPath::parse(expression),
                expected: expected.to_owned(),
            });
        }
        Err(ConditionError::Unrecognised {
            spec: spec.to_owned(),
        })
    }

    /// Checks the condition against the current observation. `None` means the
    /// document does not exist.
    #[must_use]
    pub fn is_met(&self, document: Option<&Value>) -> bool {
        match (self, document) {
            (Self::Delete, observed) => observed.is_none(),
            (_, None) => false,
            (Self::Condition(name), Some(document)) => condition_met(document, name),
            (Self::JsonPath { path, expected, .. }, Some(document)) => {
                let actual = path.evaluate(document);
                !actual.is_null() && actual.to_string() == *expected
            }
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("deletion"),
            Self::Condition(name) => write!(f, "condition {name:?}"),
            Self::JsonPath {
                expression,
                expected,
                ..
            } => write!(f, "{expression}={expected}"),
        }
    }
}

fn condition_met(document: &Value, name: &str) -> bool {
    let status = document.get("status");
    let reported_true = status
        .and_then(|status| status.get("conditions"))
        .and_then(Value::as_array)
        .is_some_and(|conditions| {
            conditions.iter().any(|condition| {
                condition.get("type").and_then(Value::as_str) == Some(name)
                    && condition.get("status").and_then(Value::as_str) == Some("True")
            })
        });
    if reported_true {
        return true;
    }
    [status, document.get("system_metadata")]
        .into_iter()
        .flatten()
        .filter_map(|holder| holder.get("state").and_then(Value::as_str))
        .any(|state| state_satisfies(state, name))
}

fn state_satisfies(state: &str, name: &str) -> bool {
    state.eq_ignore_ascii_case(name)
        || (state.eq_ignore_ascii_case("active") && name.eq_ignore_ascii_case("ready"))
}
