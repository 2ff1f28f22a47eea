use std::process::ExitCode;

use aws_login::{cli::Cli, logging};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let Err(e) = cli.execute().await else {
        return ExitCode::SUCCESS;
    };
    debug!("{e:?}");
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}
