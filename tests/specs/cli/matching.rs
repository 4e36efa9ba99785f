//! Pattern matching specs
//!
//! Verify `evbus match` verdicts and exit codes.

use crate::prelude::*;

#[test]
fn all_names_match() {
    Project::empty()
        .evbus()
        .args(&["match", "user.*", "user.created", "user.deleted"])
        .passes()
        .stdout_eq("user.created: match\nuser.deleted: match\n");
}

#[test]
fn any_miss_exits_one() {
    Project::empty()
        .evbus()
        .args(&["match", "user.*", "user.created", "user.profile.updated", "user"])
        .fails()
        .code(1)
        .stdout_eq("user.created: match\nuser.profile.updated: no match\nuser: no match\n");
}

#[test]
fn global_wildcard_matches_any_depth() {
    Project::empty()
        .evbus()
        .args(&["match", "*", "a", "a.b.c", "order.created"])
        .passes()
        .stdout_lacks("no match");
}

#[test]
fn leading_wildcard_is_one_segment() {
    Project::empty()
        .evbus()
        .args(&["match", "*.created", "order.created", "a.b.created"])
        .fails()
        .stdout_eq("order.created: match\na.b.created: no match\n");
}

#[test]
fn partial_segment_star_is_literal() {
    Project::empty()
        .evbus()
        .args(&["match", "user*", "user*", "users"])
        .fails()
        .stdout_eq("user*: match\nusers: no match\n");
}

#[test]
fn json_output() {
    let run = Project::empty()
        .evbus()
        .args(&["--format", "json", "match", "order.*", "order.paid"])
        .passes();
    let stdout = run.stdout();
    assert!(stdout.contains("\"name\": \"order.paid\""));
    assert!(stdout.contains("\"matched\": true"));
}

#[test]
fn empty_pattern_is_an_error() {
    Project::empty()
        .evbus()
        .args(&["match", "", "user.created"])
        .fails()
        .stderr_has("Pattern is empty")
        .stderr_has("suggestions:");
}

#[test]
fn help_says_empty_pattern_is_rejected() {
    Project::empty()
        .evbus()
        .args(&["match", "--help"])
        .passes()
        .stdout_has("must not be empty");
}
