//! CLI entrypoint for the `xcctl` resource client.
//!
//! The binary delegates to [`xcctl::run`], which loads configuration, parses
//! the subcommand, and renders results to the locked standard streams.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    xcctl::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
