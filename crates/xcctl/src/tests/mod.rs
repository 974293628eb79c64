//! Unit and behavioural tests for the `xcctl` runtime.

mod behaviour;
mod output_tests;
mod support;
