//! CLI integration tests
//!
//! The CLI only supports -h/--help and -V/--version flags.
//! The target server is configured through environment variables.

use clap::Parser;
use exprobe::cli::Cli;

/// Test --version output contains version number
#[test]
fn test_version_available() {
    let result = Cli::try_parse_from(["exprobe", "--version"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

/// Test --help is available
#[test]
fn test_help_available() {
    let result = Cli::try_parse_from(["exprobe", "--help"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    assert!(err.to_string().contains("EXPROBE_BASE_URL"));
}

/// Test no arguments (should run the probe)
#[test]
fn test_no_args_runs_probe() {
    let cli = Cli::try_parse_from(["exprobe"]);
    assert!(cli.is_ok());
}

/// Test unknown argument is rejected
#[test]
fn test_unknown_arg_rejected() {
    let result = Cli::try_parse_from(["exprobe", "--base-url", "http://x"]);
    assert!(result.is_err());
}

/// Test positional argument is rejected
#[test]
fn test_positional_rejected() {
    let result = Cli::try_parse_from(["exprobe", "http://localhost:8080"]);
    assert!(result.is_err());
}
