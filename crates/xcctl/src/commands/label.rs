//! `xcctl label`: set and remove labels through a merge patch.

use std::io::{Read, Write};

use tracing::debug;
use xcctl_document::{LabelChanges, MetadataField, Value, merge};

use super::write_plan;
use crate::cli::LabelArgs;
use crate::input::read_object;
use crate::output::{self, OutputFormat, RenderOptions};
use crate::{AppError, IoStreams};

pub(super) fn run<R, W, E>(
    args: &LabelArgs,
    format: &OutputFormat,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let changes = LabelChanges::parse(&args.changes)?;

    if args.dry_run {
        let heading = format!("Would update labels on {}:", args.file);
        write_plan(&heading, "Add", &changes, io.stdout).map_err(AppError::WriteOutput)?;
        return Ok(());
    }

    let document = read_object(&args.file, io.stdin)?;
    let updated = merge(&document, &changes.to_merge_patch(MetadataField::Labels));
    debug!(file = %args.file, changes = changes.changes().len(), "labels updated");
    output::render(
        format,
        &Value::Object(updated),
        RenderOptions::default(),
        io.stdout,
    )?;
    Ok(())
}
