//! Renderers for documents and lists.
//!
//! Every renderer works on the decoded document. Table-style formats treat a
//! document with an `items` array as a list and anything else as a single
//! row; the path-driven formats evaluate their expressions with the
//! never-failing dot-path evaluator, so a field missing on one row renders as
//! an empty cell instead of aborting the output.

mod columns;
mod table;
mod template;

use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use xcctl_document::{DotPath, Value};

pub(crate) use columns::Column;
pub(crate) use template::Template;

/// A parsed `-o/--output` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// One NAME column, plus LABELS when requested.
    Table,
    /// NAME, NAMESPACE, UID and CREATED columns.
    Wide,
    /// One name per line.
    Name,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// The rendered value of one expression; arrays print one element per line.
    JsonPath(DotPath),
    /// An aligned table with one column per `HEADER:PATH` pair.
    CustomColumns(Vec<Column>),
    /// Literal text with `{{ path }}` placeholders.
    Template(Template),
}

/// Failures parsing an output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum OutputFormatError {
    #[error(
        "unknown output format: {name} (expected table, wide, name, json, yaml, \
         jsonpath=<expr>, custom-columns=<spec>, or template=<text>)"
    )]
    Unknown { name: String },
    #[error("jsonpath expression is required")]
    EmptyJsonPath,
    #[error("custom-columns specification is required")]
    EmptyColumns,
    #[error("no columns specified in custom-columns={spec}")]
    NoColumns { spec: String },
    #[error("template is required")]
    EmptyTemplate,
    #[error("unterminated template placeholder at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },
}

/// Failures writing rendered output.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode YAML: {0}")]
    Yaml(String),
}

/// Switches that only some renderers honour.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RenderOptions {
    pub(crate) show_labels: bool,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let trimmed = spec.trim();
        if let Some(expression) = strip_prefix_ignore_case(trimmed, "jsonpath=") {
            let cleaned = expression.trim_matches(|ch: char| ch == '\'' || ch == '"');
            if cleaned.trim().is_empty() {
                return Err(OutputFormatError::EmptyJsonPath);
            }
            return Ok(Self::JsonPath(DotPath::parse(cleaned)));
        }
        if let Some(column_spec) = strip_prefix_ignore_case(trimmed, "custom-columns=") {
            if column_spec.trim().is_empty() {
                return Err(OutputFormatError::EmptyColumns);
            }
            let parsed = columns::parse_columns(column_spec);
            if parsed.is_empty() {
                return Err(OutputFormatError::NoColumns {
                    spec: column_spec.to_owned(),
                });
            }
            return Ok(Self::CustomColumns(parsed));
        }
        if let Some(text) = strip_prefix_ignore_case(trimmed, "template=") {
            if text.is_empty() {
                return Err(OutputFormatError::EmptyTemplate);
            }
            return Template::parse(text).map(Self::Template);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "wide" => Ok(Self::Wide),
            "name" => Ok(Self::Name),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(OutputFormatError::Unknown {
                name: trimmed.to_owned(),
            }),
        }
    }
}

impl OutputFormat {
    /// Returns `true` for the formats that print one row per list item and
    /// report an empty list instead of printing headers alone.
    pub(crate) const fn lists_items(&self) -> bool {
        matches!(self, Self::Table | Self::Wide | Self::Name)
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .and_then(|_| text.get(prefix.len()..))
}

/// Writes `document` to `out` in the requested format.
pub(crate) fn render<W: Write>(
    format: &OutputFormat,
    document: &Value,
    options: RenderOptions,
    out: &mut W,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Json => write_json(document, out)?,
        OutputFormat::Yaml => write_yaml(document, out)?,
        OutputFormat::JsonPath(path) => write_jsonpath(&path.evaluate(document), out)?,
        OutputFormat::Table => table::write_table(&object_items(document), options, out)?,
        OutputFormat::Wide => table::write_wide(&object_items(document), out)?,
        OutputFormat::Name => table::write_names(&object_items(document), out)?,
        OutputFormat::CustomColumns(columns) => {
            columns::write_columns(columns, &list_items(document), out)?;
        }
        OutputFormat::Template(template) => writeln!(out, "{}", template.render(document))?,
    }
    out.flush()?;
    Ok(())
}

/// Writes any serialisable value as pretty JSON followed by a newline.
pub(crate) fn write_json<T, W>(value: &T, out: &mut W) -> Result<(), RenderError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes any serialisable value as YAML, ending with a newline.
pub(crate) fn write_yaml<T, W>(value: &T, out: &mut W) -> Result<(), RenderError>
where
    T: Serialize,
    W: Write,
{
    let text = serde_saphyr::to_string(value).map_err(|error| RenderError::Yaml(error.to_string()))?;
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn write_jsonpath<W: Write>(result: &Value, out: &mut W) -> io::Result<()> {
    match result {
        Value::Null => Ok(()),
        Value::Array(elements) => elements
            .iter()
            .try_for_each(|element| writeln!(out, "{element}")),
        other => writeln!(out, "{other}"),
    }
}

/// Every element of a list's `items` array, or the document itself.
pub(crate) fn list_items(document: &Value) -> Vec<&Value> {
    match document.get("items").and_then(Value::as_array) {
        Some(items) => items.iter().collect(),
        None => vec![document],
    }
}

/// Like `list_items` but keeps only objects, which are the only items that
/// carry names and metadata.
pub(crate) fn object_items(document: &Value) -> Vec<&Value> {
    list_items(document)
        .into_iter()
        .filter(|item| item.as_object().is_some())
        .collect()
}
