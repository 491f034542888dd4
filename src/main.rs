use std::process::ExitCode;

use clap::Parser;
use hark::{AppError, Cli, DEFAULT_LOG_LEVEL, LOG_ENV};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the same error type.
            let code = if err.use_stderr() {
                AppError::EXIT_USAGE
            } else {
                0
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match hark::run(&cli, &mut stdout, hark::connect).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(message)) => {
            eprintln!("{}", message);
            ExitCode::from(AppError::EXIT_USAGE)
        }
        Err(err) => {
            debug!(error = ?err, "Run failed");
            let code = err.exit_code();
            eprintln!("error: {}", err.report());
            ExitCode::from(code)
        }
    }
}
