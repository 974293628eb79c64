//! Dot-path queries with wildcard fan-out over arrays.
//!
//! A dot-path is a sequence of field names separated by `.`, where a field
//! may carry one bracketed suffix: `[n]` selects a literal index and `[*]`
//! fans out over every element. Evaluation never fails. Missing keys, bad
//! indices, and malformed brackets all resolve to [`Value::Null`] so table
//! and template rendering can carry on when a field is absent on some rows.

use crate::value::Value;

/// One step of a [`DotPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Descend into an object by key.
    Field(String),
    /// Resolve `field` (or the current value when empty), then take an index.
    Index {
        /// Array field name; empty for a bare `[n]`.
        field: String,
        /// Zero-based element index.
        index: usize,
    },
    /// Resolve `field` (or the current value when empty), then apply the rest
    /// of the path to every element.
    Wildcard {
        /// Array field name; empty for a bare `[*]`.
        field: String,
    },
    /// A segment whose bracket could not be parsed. Always resolves to `Null`.
    Invalid(String),
}

/// A parsed dot-path expression.
///
/// # Example
///
/// ```
/// use xcctl_document::{DotPath, Value};
///
/// let doc = Value::parse_text(r#"{"items":[{"name":"a"},{},{"name":"c"}]}"#)
///     .expect("valid JSON");
/// let names = DotPath::parse("{.items[*].name}").evaluate(&doc);
/// assert_eq!(names, Value::from(vec![Value::from("a"), Value::from("c")]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotPath {
    segments: Vec<Segment>,
}

impl DotPath {
    /// Parses an expression. Enclosing `{}` and a leading `.` are stripped;
    /// an empty expression or `.` addresses the root.
    #[must_use]
    pub fn parse(expression: &str) -> Self {
        let mut trimmed = expression.trim();
        if let Some(inner) = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            trimmed = inner.trim();
        }
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        let segments = split_segments(body)
            .into_iter()
            .map(parse_segment)
            .collect();
        Self { segments }
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` when the path addresses the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Evaluates the path against `root`.
    ///
    /// A wildcard collects the sub-path result of each element into a new
    /// array and drops elements whose result is `Null`, so the output can be
    /// shorter than the input array.
    #[must_use]
    pub fn evaluate(&self, root: &Value) -> Value {
        evaluate_segments(root, &self.segments)
    }

    /// Resolves the path to a single borrowed location.
    ///
    /// Wildcards are not supported here and resolve to `None`, as does an
    /// explicit `Null` at the end of the path.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                Segment::Field(name) => current.get(name)?,
                Segment::Index { field, index } => {
                    field_or_self(current, field)?.as_array()?.get(*index)?
                }
                Segment::Wildcard { .. } | Segment::Invalid(_) => return None,
            };
        }
        (!current.is_null()).then_some(current)
    }
}

/// Evaluates `path` against `root`; shorthand for
/// `DotPath::parse(path).evaluate(root)`.
#[must_use]
pub fn evaluate(root: &Value, path: &str) -> Value {
    DotPath::parse(path).evaluate(root)
}

fn evaluate_segments(current: &Value, segments: &[Segment]) -> Value {
    let Some((segment, rest)) = segments.split_first() else {
        return current.clone();
    };
    match segment {
        Segment::Field(name) => current
            .get(name)
            .map_or(Value::Null, |child| evaluate_segments(child, rest)),
        Segment::Index { field, index } => field_or_self(current, field)
            .and_then(Value::as_array)
            .and_then(|items| items.get(*index))
            .map_or(Value::Null, |element| evaluate_segments(element, rest)),
        Segment::Wildcard { field } => {
            let Some(items) = field_or_self(current, field).and_then(Value::as_array) else {
                return Value::Null;
            };
            let collected = items
                .iter()
                .map(|element| evaluate_segments(element, rest))
                .filter(|result| !result.is_null())
                .collect();
            Value::Array(collected)
        }
        Segment::Invalid(_) => Value::Null,
    }
}

fn field_or_self<'a>(current: &'a Value, field: &str) -> Option<&'a Value> {
    if field.is_empty() {
        Some(current)
    } else {
        current.get(field)
    }
}

/// Splits on `.` outside brackets, dropping empty parts.
fn split_segments(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (offset, ch) in body.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                if let Some(part) = body.get(start..offset).filter(|part| !part.is_empty()) {
                    parts.push(part);
                }
                start = offset + 1;
            }
            _ => {}
        }
    }
    if let Some(part) = body.get(start..).filter(|part| !part.is_empty()) {
        parts.push(part);
    }
    parts
}

fn parse_segment(part: &str) -> Segment {
    let Some((field_name, bracket)) = part.split_once('[') else {
        return Segment::Field(part.to_owned());
    };
    let Some(selector) = bracket.strip_suffix(']') else {
        return Segment::Invalid(part.to_owned());
    };
    let field = field_name.to_owned();
    match selector.trim() {
        "*" => Segment::Wildcard { field },
        literal => literal.parse::<usize>().map_or_else(
            |_| Segment::Invalid(part.to_owned()),
            |index| Segment::Index { field, index },
        ),
    }
}
