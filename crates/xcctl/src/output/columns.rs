//! `custom-columns=HEADER:PATH,...` output.

use std::io::{self, Write};

use xcctl_document::{DotPath, Value};

use super::table::write_aligned;

/// One `HEADER:PATH` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Column {
    pub(crate) header: String,
    pub(crate) path: DotPath,
}

/// Parses comma-separated `HEADER:PATH` pairs. Pairs without a colon, a
/// header, or a path are skipped.
pub(crate) fn parse_columns(spec: &str) -> Vec<Column> {
    spec.split(',')
        .filter_map(|pair| pair.trim().split_once(':'))
        .map(|(header, path)| (header.trim(), path.trim()))
        .filter(|(header, path)| !header.is_empty() && !path.is_empty())
        .map(|(header, path)| Column {
            header: header.to_owned(),
            path: DotPath::parse(path),
        })
        .collect()
}

pub(crate) fn write_columns<W: Write>(
    columns: &[Column],
    items: &[&Value],
    out: &mut W,
) -> io::Result<()> {
    let header: Vec<String> = columns.iter().map(|column| column.header.clone()).collect();
    let rows = std::iter::once(header)
        .chain(items.iter().map(|item| {
            columns
                .iter()
                .map(|column| column.path.evaluate(item).to_string())
                .collect::<Vec<_>>()
        }))
        .collect::<Vec<_>>();
    write_aligned(&rows, out)
}
