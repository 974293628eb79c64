//! `xcctl wait`: poll a document until a condition holds.

use std::fs;
use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use tracing::debug;
use xcctl_config::Config;
use xcctl_document::{Value, WaitCondition};

use crate::cli::WaitArgs;
use crate::input::is_stdin;
use crate::{AppError, IoStreams};

/// What one poll saw at the watched path.
#[derive(Debug, Clone, PartialEq)]
enum Observation {
    Absent,
    Present(Value),
    /// The file exists but could not be read or decoded yet.
    Unreadable,
}

impl Observation {
    fn take(path: &Utf8Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Self::Absent,
            Err(error) => {
                debug!(file = %path, %error, "document not readable yet");
                return Self::Unreadable;
            }
        };
        match Value::parse_text(&text) {
            Ok(document) => Self::Present(document),
            Err(error) => {
                debug!(file = %path, %error, "document not decodable yet");
                Self::Unreadable
            }
        }
    }

    fn satisfies(&self, condition: &WaitCondition) -> bool {
        match self {
            Self::Absent => condition.is_met(None),
            Self::Present(document) => condition.is_met(Some(document)),
            Self::Unreadable => false,
        }
    }
}

pub(super) fn run<R, W, E>(
    args: &WaitArgs,
    config: &Config,
    io: &mut IoStreams<'_, R, W, E>,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
    E: Write,
{
    if is_stdin(&args.file) {
        return Err(AppError::WaitOnStdin);
    }
    let condition = WaitCondition::parse(&args.condition)?;
    let timeout = args
        .timeout
        .map_or_else(|| config.wait_timeout(), Duration::from_secs);
    let poll_interval = config.poll_interval();

    writeln!(io.stderr, "Waiting for {condition} on {}...", args.file)
        .map_err(AppError::WriteOutput)?;

    // An unrepresentable deadline means the wait never times out.
    let deadline = Instant::now().checked_add(timeout);
    let mut attempts = 0u64;
    loop {
        attempts += 1;
        if Observation::take(&args.file).satisfies(&condition) {
            debug!(file = %args.file, attempts, "wait condition met");
            writeln!(io.stderr, "{}: {condition} met", args.file)
                .map_err(AppError::WriteOutput)?;
            return Ok(());
        }
        let remaining = deadline.map_or(poll_interval, |limit| {
            limit.saturating_duration_since(Instant::now())
        });
        if remaining.is_zero() {
            return Err(AppError::WaitTimeout {
                condition: condition.to_string(),
                path: args.file.to_string(),
            });
        }
        thread::sleep(poll_interval.min(remaining));
    }
}
