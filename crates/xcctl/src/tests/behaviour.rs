//! BDD step definitions for `xcctl` command behaviour.
//!
//! These steps map scenarios in `tests/features/xcctl_cli.feature` to
//! in-process runs of the CLI against scratch files.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::TestWorld;

/// Strips the surrounding quotes and expands the `\"` and `\n` escapes
/// feature files use.
fn unescape(text: &str) -> String {
    let inner = text.strip_prefix('"').unwrap_or(text);
    inner
        .strip_suffix('"')
        .unwrap_or(inner)
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

#[given("a file {name} containing {contents}")]
fn given_file(world: &RefCell<TestWorld>, name: String, contents: String) {
    world
        .borrow()
        .write_file(name.trim_matches('"'), &unescape(&contents));
}

#[given("standard input containing {contents}")]
fn given_stdin(world: &RefCell<TestWorld>, contents: String) {
    world.borrow_mut().stdin = unescape(&contents);
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &RefCell<TestWorld>, command: String) {
    world.borrow_mut().run(&unescape(&command));
}

#[then("the CLI succeeds")]
fn then_succeeds(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    let outcome = world.outcome();
    assert!(outcome.succeeded(), "stderr: {}", outcome.stderr);
}

#[then("the CLI fails")]
fn then_fails(world: &RefCell<TestWorld>) {
    assert!(!world.borrow().outcome().succeeded());
}

#[then("stdout is {expected}")]
fn then_stdout_is(world: &RefCell<TestWorld>, expected: String) {
    assert_eq!(world.borrow().outcome().stdout, unescape(&expected));
}

#[then("stdout is empty")]
fn then_stdout_empty(world: &RefCell<TestWorld>) {
    assert!(world.borrow().outcome().stdout.is_empty());
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let stdout = &world.outcome().stdout;
    let expected = unescape(&snippet);
    assert!(
        stdout.contains(&expected),
        "stdout {stdout:?} did not contain {expected:?}"
    );
}

#[then("stderr contains {snippet}")]
fn then_stderr_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let stderr = &world.outcome().stderr;
    let expected = unescape(&snippet);
    assert!(
        stderr.contains(&expected),
        "stderr {stderr:?} did not contain {expected:?}"
    );
}

#[scenario(path = "tests/features/xcctl_cli.feature")]
fn xcctl_cli_behaviour(world: RefCell<TestWorld>) {
    let _ = world;
}
