//! `xcctl get`: render a document or a client-side filtered list.

use std::io::{Read, Write};

use tracing::debug;
use xcctl_document::{FieldSelector, LabelSelector, Value, filter_items};

use crate::cli::GetArgs;
use crate::input::read_document;
use crate::output::{self, OutputFormat, RenderOptions};
use crate::{AppError, IoStreams};

pub(super) fn run<R, W, E>(
    args: &GetArgs,
    format: &OutputFormat,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let document = read_document(&args.file, io.stdin)?;
    let label_selector = args
        .selector
        .as_deref()
        .map(LabelSelector::parse)
        .unwrap_or_default();
    let field_selector = args
        .field_selector
        .as_deref()
        .map(FieldSelector::parse)
        .unwrap_or_default();

    // Filtering runs on the decoded list, labels before fields.
    let filtered = filter_items(&filter_items(&document, &label_selector), &field_selector);

    if format.lists_items() && is_empty_list(&filtered) {
        debug!(file = %args.file, "no items left after filtering");
        writeln!(io.stderr, "No resources found.").map_err(AppError::WriteOutput)?;
        return Ok(());
    }

    let options = RenderOptions {
        show_labels: args.show_labels,
    };
    output::render(format, &filtered, options, io.stdout)?;
    Ok(())
}

fn is_empty_list(document: &Value) -> bool {
    document
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(<[Value]>::is_empty)
}
