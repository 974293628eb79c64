//! `xcctl patch`: apply a merge or pointer patch to a document.

use std::io::{Read, Write};

use camino::Utf8Path;
use tracing::debug;
use xcctl_document::{PatchInput, Value};

use crate::cli::PatchArgs;
use crate::input::{STDIN_MARKER, is_stdin, read_object, read_source};
use crate::output::{self, OutputFormat, RenderOptions, write_yaml};
use crate::{AppError, IoStreams};

/// Where the patch text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchSource<'a> {
    Inline(&'a str),
    File(&'a Utf8Path),
    Stdin,
}

impl<'a> PatchSource<'a> {
    fn from_args(args: &'a PatchArgs) -> Result<Self, AppError> {
        if let Some(path) = args.patch_file.as_deref() {
            return Ok(if is_stdin(path) {
                Self::Stdin
            } else {
                Self::File(path)
            });
        }
        match args.patch.as_deref() {
            Some(STDIN_MARKER) => Ok(Self::Stdin),
            Some(text) => Ok(Self::Inline(text)),
            None => Err(AppError::MissingPatch),
        }
    }

    fn read<R: Read>(self, stdin: &mut R) -> Result<String, AppError> {
        match self {
            Self::Inline(text) => Ok(text.to_owned()),
            Self::File(path) => read_source(path, stdin),
            Self::Stdin => read_source(Utf8Path::new(STDIN_MARKER), stdin),
        }
    }
}

pub(super) fn run<R, W, E>(
    args: &PatchArgs,
    format: &OutputFormat,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let source = PatchSource::from_args(args)?;
    if source == PatchSource::Stdin && is_stdin(&args.file) && !args.dry_run {
        return Err(AppError::StdinReadTwice);
    }
    let text = source.read(io.stdin)?;
    let patch = PatchInput::parse(&text, args.patch_type)?;

    if args.dry_run {
        let heading = match &patch {
            PatchInput::Merge(_) => "Would patch",
            PatchInput::Json(_) => "Would apply JSON patch to",
        };
        writeln!(io.stdout, "{heading} {}:", args.file).map_err(AppError::WriteOutput)?;
        write_yaml(&patch, io.stdout)?;
        return Ok(());
    }

    let document = read_object(&args.file, io.stdin)?;
    let updated = patch.apply_to(&document)?;
    debug!(
        file = %args.file,
        patch_type = %args.patch_type,
        "patch applied"
    );
    output::render(
        format,
        &Value::Object(updated),
        RenderOptions::default(),
        io.stdout,
    )?;
    Ok(())
}
