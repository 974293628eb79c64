//! CLI argument definitions for `xcctl`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use xcctl_document::PatchType;

/// Command-line interface for the `xcctl` resource client.
#[derive(Parser, Debug)]
#[command(
    name = "xcctl",
    version,
    about = "Query, filter, and patch resource documents",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Output format: table, wide, name, json, yaml, jsonpath=EXPR,
    /// custom-columns=HEADER:PATH,... or template=TEXT.
    #[arg(short = 'o', long, global = true, value_name = "FORMAT")]
    pub(crate) output: Option<String>,
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands of the client.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Renders a document or list, filtering list items by selector.
    Get(GetArgs),
    /// Applies a merge or pointer patch and prints the update body.
    Patch(PatchArgs),
    /// Sets or removes labels and prints the update body.
    Label(LabelArgs),
    /// Lists, sets, or removes annotations and prints the update body.
    Annotate(AnnotateArgs),
    /// Polls a document until a condition holds.
    Wait(WaitArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GetArgs {
    /// Document or list to read; `-` reads standard input.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Label selector, for example `env in (prod,staging),!owner`.
    #[arg(short = 'l', long = "selector", value_name = "SELECTOR")]
    pub(crate) selector: Option<String>,
    /// Field selector, for example `metadata.namespace=default`.
    #[arg(long, value_name = "SELECTOR")]
    pub(crate) field_selector: Option<String>,
    /// Adds a LABELS column to table output.
    #[arg(long)]
    pub(crate) show_labels: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PatchArgs {
    /// Document to patch; `-` reads standard input.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Inline patch text; `-` reads standard input.
    #[arg(short = 'p', long = "patch", value_name = "PATCH", conflicts_with = "patch_file")]
    pub(crate) patch: Option<String>,
    /// File holding the patch.
    #[arg(long, value_name = "FILE")]
    pub(crate) patch_file: Option<Utf8PathBuf>,
    /// Patch flavour: merge (alias strategic) or json.
    #[arg(long = "type", value_name = "TYPE", default_value_t = PatchType::Merge)]
    pub(crate) patch_type: PatchType,
    /// Prints the decoded patch without applying it.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct LabelArgs {
    /// Document to relabel; `-` reads standard input.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Changes of the form `key=value` or `key-`.
    #[arg(value_name = "CHANGE", required = true)]
    pub(crate) changes: Vec<String>,
    /// Prints the intended changes without applying them.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateArgs {
    /// Document to annotate; `-` reads standard input.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// Changes of the form `key=value` or `key-`.
    #[arg(value_name = "CHANGE")]
    pub(crate) changes: Vec<String>,
    /// Allows replacing annotations that already exist.
    #[arg(long)]
    pub(crate) overwrite: bool,
    /// Prints the current annotations instead of changing them.
    #[arg(long, conflicts_with_all = ["changes", "dry_run"])]
    pub(crate) list: bool,
    /// Prints the intended changes without applying them.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct WaitArgs {
    /// Document to poll. It is re-read on every attempt.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub(crate) file: Utf8PathBuf,
    /// `delete`, `condition=<name>`, or `jsonpath=<expr>=<value>`.
    #[arg(long = "for", value_name = "CONDITION")]
    pub(crate) condition: String,
    /// Seconds to wait; defaults to the configured timeout.
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,
}
