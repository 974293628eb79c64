//! Built-in tabular formats and the aligned column writer they share.

use std::io::{self, Write};

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use unicode_width::UnicodeWidthStr;
use xcctl_document::{Value, labels_of};

use super::RenderOptions;

/// Spaces between two columns.
const COLUMN_GAP: usize = 2;

/// Writes rows so every column starts at the same display offset. Trailing
/// blanks are trimmed, so empty cells at the end of a row leave no padding.
pub(crate) fn write_aligned<W: Write>(rows: &[Vec<String>], out: &mut W) -> io::Result<()> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (column, cell) in row.iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(column) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    for row in rows {
        let last = row.len().saturating_sub(1);
        let mut line = String::new();
        for (column, (cell, width)) in row.iter().zip(&widths).enumerate() {
            line.push_str(cell);
            if column < last {
                let padding = width.saturating_sub(cell.width()) + COLUMN_GAP;
                line.extend(std::iter::repeat_n(' ', padding));
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

pub(crate) fn write_table<W: Write>(
    items: &[&Value],
    options: RenderOptions,
    out: &mut W,
) -> io::Result<()> {
    let header = if options.show_labels {
        vec![String::from("NAME"), String::from("LABELS")]
    } else {
        vec![String::from("NAME")]
    };
    let rows = std::iter::once(header)
        .chain(items.iter().map(|item| {
            let mut row = vec![name_of(item)];
            if options.show_labels {
                row.push(label_summary(item));
            }
            row
        }))
        .collect::<Vec<_>>();
    write_aligned(&rows, out)
}

pub(crate) fn write_wide<W: Write>(items: &[&Value], out: &mut W) -> io::Result<()> {
    let header = ["NAME", "NAMESPACE", "UID", "CREATED"]
        .map(String::from)
        .to_vec();
    let rows = std::iter::once(header)
        .chain(items.iter().map(|item| {
            vec![
                name_of(item),
                namespace_of(item),
                uid_of(item),
                created_of(item),
            ]
        }))
        .collect::<Vec<_>>();
    write_aligned(&rows, out)
}

pub(crate) fn write_names<W: Write>(items: &[&Value], out: &mut W) -> io::Result<()> {
    items
        .iter()
        .try_for_each(|item| writeln!(out, "{}", name_of(item)))
}

fn string_at<'a>(item: &'a Value, parent: &str, key: &str) -> Option<&'a str> {
    item.get(parent)
        .and_then(|holder| holder.get(key))
        .and_then(Value::as_str)
}

fn name_of(item: &Value) -> String {
    string_at(item, "metadata", "name")
        .or_else(|| item.get("name").and_then(Value::as_str))
        .unwrap_or("<unknown>")
        .to_owned()
}

fn namespace_of(item: &Value) -> String {
    string_at(item, "metadata", "namespace")
        .filter(|namespace| !namespace.is_empty())
        .or_else(|| {
            item.get("namespace")
                .and_then(Value::as_str)
                .filter(|namespace| !namespace.is_empty())
        })
        .unwrap_or("default")
        .to_owned()
}

fn uid_of(item: &Value) -> String {
    string_at(item, "system_metadata", "uid")
        .or_else(|| item.get("uid").and_then(Value::as_str))
        .unwrap_or("<none>")
        .to_owned()
}

fn created_of(item: &Value) -> String {
    string_at(item, "system_metadata", "creation_timestamp")
        .map_or_else(|| String::from("<unknown>"), format_timestamp)
}

/// Normalises an RFC 3339 timestamp to whole seconds in UTC. Anything else is
/// shown as written.
fn format_timestamp(raw: &str) -> String {
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|timestamp| {
            timestamp
                .to_offset(UtcOffset::UTC)
                .format(format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
                ))
                .ok()
        })
        .unwrap_or_else(|| raw.to_owned())
}

fn label_summary(item: &Value) -> String {
    labels_of(item)
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}
