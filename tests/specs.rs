//! Behavioral specifications for the evbus CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/config.rs"]
mod cli_config;
#[path = "specs/cli/demo.rs"]
mod cli_demo;
#[path = "specs/cli/help.rs"]
mod cli_help;
#[path = "specs/cli/matching.rs"]
mod cli_matching;
