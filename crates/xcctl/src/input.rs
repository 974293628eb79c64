//! Reading documents and patches from files or standard input.
//!
//! Documents reach the client already fetched: the transport writes them to a
//! file, or pipes them in, and these helpers decode them as JSON or YAML.

use std::fs;
use std::io::Read;

use camino::Utf8Path;
use xcctl_document::{Map, Value};

use crate::AppError;

/// Path argument that selects standard input.
pub(crate) const STDIN_MARKER: &str = "-";

pub(crate) fn is_stdin(path: &Utf8Path) -> bool {
    path.as_str() == STDIN_MARKER
}

fn describe(path: &Utf8Path) -> String {
    if is_stdin(path) {
        String::from("standard input")
    } else {
        path.to_string()
    }
}

/// Reads the full text behind `path`, where `-` is standard input.
pub(crate) fn read_source<R: Read>(path: &Utf8Path, stdin: &mut R) -> Result<String, AppError> {
    let read = if is_stdin(path) {
        let mut text = String::new();
        stdin.read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| AppError::ReadInput {
        path: describe(path),
        source,
    })
}

pub(crate) fn read_document<R: Read>(path: &Utf8Path, stdin: &mut R) -> Result<Value, AppError> {
    let text = read_source(path, stdin)?;
    Value::parse_text(&text).map_err(|source| AppError::DecodeDocument {
        path: describe(path),
        source,
    })
}

/// Reads a document that must be a single object, as patch targets are.
pub(crate) fn read_object<R: Read>(path: &Utf8Path, stdin: &mut R) -> Result<Map, AppError> {
    match read_document(path, stdin)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::NotAnObject {
            path: describe(path),
            kind: other.kind(),
        }),
    }
}
