//! `xcctl annotate`: list, set, and remove annotations through a merge patch.

use std::io::{self, Read, Write};

use camino::Utf8Path;
use tracing::debug;
use xcctl_document::{LabelChanges, Map, MetadataField, Value, merge};

use super::write_plan;
use crate::cli::AnnotateArgs;
use crate::input::read_object;
use crate::output::{self, OutputFormat, RenderOptions};
use crate::{AppError, IoStreams};

pub(super) fn run<R, W, E>(
    args: &AnnotateArgs,
    format: &OutputFormat,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    if args.list {
        let document = read_object(&args.file, io.stdin)?;
        return write_listing(
            &args.file,
            MetadataField::Annotations.current(&document),
            io.stdout,
        )
        .map_err(AppError::WriteOutput);
    }

    if args.changes.is_empty() {
        return Err(AppError::MissingAnnotations);
    }
    let changes =
        LabelChanges::parse(&args.changes).map_err(|error| AppError::AnnotationFormat {
            argument: error.argument,
        })?;

    let document = read_object(&args.file, io.stdin)?;
    if !args.overwrite {
        let current = MetadataField::Annotations.current(&document);
        if let Some(key) = changes.assigned_existing(current).first() {
            return Err(AppError::AnnotationExists {
                key: (*key).to_owned(),
            });
        }
    }

    if args.dry_run {
        let heading = format!("Would update annotations on {}:", args.file);
        write_plan(&heading, "Add/Update", &changes, io.stdout).map_err(AppError::WriteOutput)?;
        return Ok(());
    }

    let updated = merge(&document, &changes.to_merge_patch(MetadataField::Annotations));
    debug!(file = %args.file, changes = changes.changes().len(), "annotations updated");
    output::render(
        format,
        &Value::Object(updated),
        RenderOptions::default(),
        io.stdout,
    )?;
    Ok(())
}

fn write_listing<W: Write>(
    file: &Utf8Path,
    annotations: Option<&Map>,
    out: &mut W,
) -> io::Result<()> {
    match annotations {
        Some(entries) if !entries.is_empty() => {
            writeln!(out, "Annotations on {file}:")?;
            entries
                .iter()
                .try_for_each(|(key, value)| writeln!(out, "  {key}={value}"))
        }
        _ => writeln!(out, "{file} has no annotations"),
    }
}
