//! Test support for driving the CLI runtime in-process.
//!
//! Supplies a static configuration loader, a scratch directory for documents,
//! and captured output streams so tests can focus on their assertions.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use xcctl_config::Config;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

/// Placeholder in command lines replaced with the scratch directory.
const DIR_PLACEHOLDER: &str = "{dir}";

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Captured result of one CLI invocation.
#[derive(Debug)]
pub(super) struct Outcome {
    pub exit_code: ExitCode,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == ExitCode::SUCCESS
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should be JSON")
    }
}

pub(super) struct TestWorld {
    pub config: Config,
    pub dir: TempDir,
    pub stdin: String,
    pub outcome: Option<Outcome>,
}

impl TestWorld {
    pub fn new() -> Self {
        let config = Config {
            poll_interval_ms: 10,
            ..Config::default()
        };
        Self {
            config,
            dir: TempDir::new().expect("create scratch directory"),
            stdin: String::new(),
            outcome: None,
        }
    }

    pub fn dir_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf())
            .expect("scratch directory is UTF-8")
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.dir_path().join(name);
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    /// Runs `args` after the program name, substituting `{dir}`.
    pub fn run_args<S: AsRef<str>>(&mut self, args: &[S]) -> &Outcome {
        let dir = self.dir_path();
        let argv: Vec<OsString> = std::iter::once(OsString::from("xcctl"))
            .chain(
                args.iter()
                    .map(|arg| OsString::from(arg.as_ref().replace(DIR_PLACEHOLDER, dir.as_str()))),
            )
            .collect();
        let mut stdin = Cursor::new(self.stdin.clone().into_bytes());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let loader = StaticConfigLoader::new(self.config.clone());
        let exit_code = {
            let mut io = IoStreams::new(&mut stdin, &mut stdout, &mut stderr);
            run_with_loader(argv, &mut io, &loader)
        };
        self.outcome = Some(Outcome {
            exit_code,
            stdout: String::from_utf8(stdout).expect("stdout utf8"),
            stderr: String::from_utf8(stderr).expect("stderr utf8"),
        });
        self.outcome()
    }

    /// Runs a whitespace-separated command line.
    pub fn run(&mut self, command: &str) -> &Outcome {
        let args: Vec<&str> = command.split_whitespace().collect();
        self.run_args(&args)
    }

    pub const fn outcome(&self) -> &Outcome {
        self.outcome.as_ref().expect("the CLI should have run")
    }
}

pub(super) const SERVICE_LIST: &str = r#"{
  "kind": "list",
  "items": [
    {
      "metadata": {"name": "web", "namespace": "shop", "labels": {"env": "prod", "tier": "frontend"}},
      "system_metadata": {"uid": "u-1", "creation_timestamp": "2024-03-01T10:20:30.123Z"},
      "spec": {"port": 80}
    },
    {
      "metadata": {"name": "db", "labels": {"env": "dev"}},
      "spec": {"port": 5432}
    },
    {
      "metadata": {"name": "cache", "namespace": "shop"},
      "spec": {"port": 6379}
    }
  ]
}"#;
