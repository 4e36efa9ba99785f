//! Configuration specs
//!
//! Verify `evbus config` and `--config` loading.

use crate::prelude::*;

#[test]
fn defaults_without_config_file() {
    Project::empty()
        .evbus()
        .args(&["config"])
        .passes()
        .stdout_has("[middleware]")
        .stdout_has("logging = false")
        .stdout_has("slow_threshold = \"250ms\"")
        .stdout_has("retry_attempts = 1")
        .stdout_has("[log]")
        .stdout_has("level = \"warn\"")
        .stdout_lacks("source");
}

#[test]
fn config_file_is_applied() {
    let temp = Project::empty();
    temp.file("bus.toml", FULL_CONFIG);

    temp.evbus()
        .args(&["--config", "bus.toml", "config"])
        .passes()
        .stdout_has("source = \"billing\"")
        .stdout_has("slow_threshold = \"1s\"")
        .stdout_has("retry_attempts = 3")
        .stdout_has("level = \"info\"");
}

#[test]
fn config_as_json() {
    Project::empty()
        .evbus()
        .args(&["config", "--format", "json"])
        .passes()
        .stdout_has("\"slow_threshold\": \"250ms\"");
}

#[test]
fn missing_config_file_fails_with_suggestions() {
    Project::empty()
        .evbus()
        .args(&["--config", "absent.toml", "config"])
        .fails()
        .stderr_has("Failed to load config 'absent.toml'")
        .stderr_has("Omit --config");
}

#[test]
fn invalid_config_file_fails() {
    let temp = Project::empty();
    temp.file("bus.toml", "[middleware]\nslow_threshold = \"whenever\"\n");

    temp.evbus()
        .args(&["--config", "bus.toml", "config"])
        .fails()
        .stderr_has("invalid config");
}
