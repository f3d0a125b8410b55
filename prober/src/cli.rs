//! CLI module for exprobe
//!
//! Only -h/--help and -V/--version are accepted.
//! The target server is configured through environment variables.

use clap::Parser;

/// Exception Probe - smoke test for a server's exception-handling endpoints
#[derive(Parser, Debug)]
#[command(name = "exprobe")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    EXPROBE_BASE_URL        Target server (default: http://localhost:8080)
    EXPROBE_LOG_LEVEL       Log level (default: info)
    EXPROBE_TIMEOUT_SECS    Per-request timeout in seconds (default: none)
"#)]
pub struct Cli;
