//! DarConnect console - patient transport coordination
//!
//! Runs one console command against the remote service and prints the result.

use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use darconnect_console::{config::AppConfig, console::Command, Console};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing (stderr, so command output stays clean)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "darconnect_console={level},darconnect={level}",
            level = config.logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(
        "DarConnect console v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&argv) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", darconnect_console::console::USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    let console = Console::new(config).context("Failed to initialize the console")?;
    if let Err(e) = console.hydrate() {
        tracing::warn!("Could not restore session: {}", e);
    }

    let label = command.label();
    let operation = command.operation();
    match console.execute(command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!("{} failed: {:?}", label, e);
            eprintln!("{}", e.user_message(label, operation));
            Ok(ExitCode::FAILURE)
        }
    }
}
