//! Behavioural tests for configuration layering.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::time::Duration;

use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use xcctl_config::{Config, LogFormat};

struct Harness {
    temp_dir: TempDir,
    config_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            config_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("xcctl")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    fn write_config_line(&self, key: &str, toml_value: &str) {
        let path = self.temp_dir.path().join("xcctl.toml");
        let first_line = self.config_lines.borrow().is_empty();
        self.config_lines
            .borrow_mut()
            .push(format!("{key} = {toml_value}"));
        let contents = self.config_lines.borrow().join("\n");
        if let Err(error) = fs::write(&path, contents) {
            panic!("failed to write configuration: {error}");
        }
        if first_line {
            let mut args = self.cli_args.borrow_mut();
            args.insert(1, path.into_os_string());
            args.insert(1, OsString::from("--config-path"));
        }
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` in edition 2024. Each scenario uses
        // its own variable and `Drop` restores the previous value.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => {
                *self.loaded.borrow_mut() = Some(config);
            }
            Err(error) => {
                *self.error.borrow_mut() = Some(error.to_string());
            }
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting \"{key}\" to \"{value}\"")]
fn given_configuration_file(harness: &Harness, key: String, value: String) {
    harness.write_config_line(&key, &value);
}

#[given("the environment sets \"{key}\" to \"{value}\"")]
fn given_environment_override(harness: &Harness, key: String, value: String) {
    harness.set_env(&key, &value);
}

#[when("the CLI sets \"{flag}\" to \"{value}\"")]
fn when_cli_override(harness: &Harness, flag: String, value: String) {
    harness.push_cli_arg(flag);
    harness.push_cli_arg(value);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the log filter to \"{filter}\"")]
fn then_resolved_log_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.loaded_config().log_filter(), filter);
}

#[then("loading the configuration resolves the default output to \"{output}\"")]
fn then_resolved_default_output(harness: &Harness, output: String) {
    assert_eq!(harness.loaded_config().default_output(), output);
}

#[then("loading the configuration resolves the poll interval to {millis} milliseconds")]
fn then_resolved_poll_interval(harness: &Harness, millis: u64) {
    assert_eq!(
        harness.loaded_config().poll_interval(),
        Duration::from_millis(millis)
    );
}

#[then("loading the configuration resolves the wait timeout to {secs} seconds")]
fn then_resolved_wait_timeout(harness: &Harness, secs: u64) {
    assert_eq!(harness.loaded_config().wait_timeout(), Duration::from_secs(secs));
}

#[then("loading the configuration fails")]
fn then_loading_fails(harness: &Harness) {
    harness.load();
    assert!(
        harness.error.borrow().is_some(),
        "expected configuration loading to fail"
    );
}

#[test]
fn loading_with_only_the_program_name_yields_defaults() {
    let config = match Config::load_from_iter([OsString::from("xcctl")]) {
        Ok(config) => config,
        Err(error) => panic!("configuration without layers should load: {error}"),
    };
    assert_eq!(config.log_filter(), "warn");
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert_eq!(config.wait_timeout(), Duration::from_secs(30));
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(harness: Harness) {
    let _ = harness;
}
