//! Error types and diagnostics helpers for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use xcctl_document::{
    ConditionError, DecodeError, LabelChangeError, PatchError, PatchInputError,
};

use crate::output::{OutputFormatError, RenderError};
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadInput { path: String, source: io::Error },
    #[error("failed to decode {path}: {source}")]
    DecodeDocument { path: String, source: DecodeError },
    #[error("{path} must contain an object, found {kind}")]
    NotAnObject { path: String, kind: &'static str },
    #[error("standard input can only supply one of the document and the patch")]
    StdinReadTwice,
    #[error("patch data required: use -p/--patch or --patch-file")]
    MissingPatch,
    #[error(transparent)]
    PatchInput(#[from] PatchInputError),
    #[error("failed to apply patch: {0}")]
    Patch(#[from] PatchError),
    #[error(transparent)]
    LabelChange(#[from] LabelChangeError),
    #[error("invalid annotation format: {argument} (expected key=value or key-)")]
    AnnotationFormat { argument: String },
    #[error("at least one annotation required")]
    MissingAnnotations,
    #[error("annotation {key:?} already exists (use --overwrite to update)")]
    AnnotationExists { key: String },
    #[error(transparent)]
    Condition(#[from] ConditionError),
    #[error("wait polls a file and cannot read standard input")]
    WaitOnStdin,
    #[error("timed out waiting for {condition} on {path}")]
    WaitTimeout { condition: String, path: String },
    #[error(transparent)]
    OutputFormat(#[from] OutputFormatError),
    #[error("failed to render output: {0}")]
    Render(#[from] RenderError),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
