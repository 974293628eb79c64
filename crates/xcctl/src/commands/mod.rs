//! Subcommand implementations.
//!
//! Each command reads its input through the `input` helpers, runs one of the
//! document engines, and renders the result through the `output` renderers.

mod annotate;
mod get;
mod label;
mod patch;
mod wait;

use std::io::{self, Read, Write};
use std::str::FromStr;

use xcctl_config::Config;
use xcctl_document::{LabelChange, LabelChanges};

use crate::cli::{Cli, CliCommand};
use crate::output::OutputFormat;
use crate::{AppError, IoStreams};

/// Format used by commands that print an update body when `-o` is absent.
const UPDATE_BODY_OUTPUT: &str = "json";

pub(crate) fn dispatch<R, W, E>(
    cli: Cli,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    let Cli { output, command } = cli;
    match command {
        CliCommand::Get(args) => {
            let format = resolve_format(output.as_deref(), config.default_output())?;
            get::run(&args, &format, io)
        }
        CliCommand::Patch(args) => {
            let format = resolve_format(output.as_deref(), UPDATE_BODY_OUTPUT)?;
            patch::run(&args, &format, io)
        }
        CliCommand::Label(args) => {
            let format = resolve_format(output.as_deref(), UPDATE_BODY_OUTPUT)?;
            label::run(&args, &format, io)
        }
        CliCommand::Annotate(args) => {
            let format = resolve_format(output.as_deref(), UPDATE_BODY_OUTPUT)?;
            annotate::run(&args, &format, io)
        }
        CliCommand::Wait(args) => wait::run(&args, config, io),
    }
}

fn resolve_format(requested: Option<&str>, fallback: &str) -> Result<OutputFormat, AppError> {
    OutputFormat::from_str(requested.unwrap_or(fallback)).map_err(AppError::from)
}

/// Prints a dry-run summary of `changes`: additions under `additions`,
/// removals under `Remove`, and empty groups omitted.
fn write_plan<W: Write>(
    heading: &str,
    additions: &str,
    changes: &LabelChanges,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    let assignments: Vec<_> = changes
        .changes()
        .iter()
        .filter_map(|change| match change {
            LabelChange::Set { key, value } => Some(format!("{key}={value}")),
            LabelChange::Remove { .. } => None,
        })
        .collect();
    let removals: Vec<_> = changes
        .changes()
        .iter()
        .filter_map(|change| match change {
            LabelChange::Remove { key } => Some(key.as_str()),
            LabelChange::Set { .. } => None,
        })
        .collect();
    if !assignments.is_empty() {
        writeln!(out, "  {additions}:")?;
        assignments
            .iter()
            .try_for_each(|assignment| writeln!(out, "    {assignment}"))?;
    }
    if !removals.is_empty() {
        writeln!(out, "  Remove:")?;
        removals
            .iter()
            .try_for_each(|key| writeln!(out, "    {key}"))?;
    }
    Ok(())
}
