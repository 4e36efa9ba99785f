//! Help and usage specs
//!
//! Verify the command surface and argument errors.

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .evbus()
        .args(&["--help"])
        .passes()
        .stdout_has("match")
        .stdout_has("config")
        .stdout_has("demo");
}

#[test]
fn missing_command_fails() {
    Project::empty().evbus().fails().code(2).stderr_has("Usage");
}

#[test]
fn match_requires_at_least_one_name() {
    Project::empty()
        .evbus()
        .args(&["match", "user.*"])
        .fails()
        .code(2);
}

#[test]
fn unknown_scenario_lists_choices() {
    Project::empty()
        .evbus()
        .args(&["demo", "teleport"])
        .fails()
        .code(2)
        .stderr_has("registration");
}
