use clap::Parser;
use pages_deploy::cli::{run, Cli};

fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing for the CLI.
    tracing_subscriber::fmt::init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(outcome) => {
            tracing::info!(outcome = ?outcome, "CLI completed");
            outcome.exit_code()
        }
        Err(e) => {
            tracing::error!(error = %e, exit_code = e.exit_code(), "CLI exited with error");
            e.exit_code()
        }
    };
    std::process::exit(code);
}
