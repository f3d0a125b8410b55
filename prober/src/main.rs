//! Exception Probe Entry Point

use std::process::ExitCode;

use clap::Parser;
use exprobe::cases::default_test_cases;
use exprobe::cli::Cli;
use exprobe::{logging, ProbeRunner};
use exprobe_common::config::ProbeConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI (only -h/--help and -V/--version)
    let _cli = Cli::parse();

    let config = ProbeConfig::from_env();
    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("Exception Probe v{}", env!("CARGO_PKG_VERSION"));

    let runner = match ProbeRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            error!("Failed to initialize probe runner: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cases = default_test_cases();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match runner.run(&cases, &mut out).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code() as u8),
        Err(e) => {
            error!("Probe run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
