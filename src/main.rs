use clap::Parser;
use fyp_portal_client::{
    AppConfig, Portal, init_tracing,
    cli::{self, Cli},
};
use std::process::ExitCode;
use tracing::error;

/// main
///
/// Loads configuration, installs logging, wires the portal and runs one command.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let config = AppConfig::load();
    init_tracing(&config.env);

    let cli = Cli::parse();

    let portal = match Portal::from_config(config) {
        Ok(portal) => portal,
        Err(e) => {
            error!(error = %e, "failed to initialise portal client");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&portal, cli.command).await {
        Ok(output) => {
            for line in &output.lines {
                println!("{line}");
            }
            ExitCode::from(output.exit_code)
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
