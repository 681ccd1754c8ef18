use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod console;
mod constants;
mod error;
mod events;
mod fullscreen;
mod slot;
#[cfg(test)]
mod testing;
mod types;
mod window;

use config::DemoConfig;
use console::Console;
use constants::DEFAULT_LOG_FILTER;
use window::X11Display;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr, stdout carries the user-facing lines
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialize logging")?;

    let config = DemoConfig::default();
    let mut console = Console::new(std::io::stdout());

    let result = fullscreen::run(
        || X11Display::connect(config.display_name.as_deref()),
        &config,
        &mut console,
    )
    .await;

    let status = fullscreen::report(&result, &mut console);
    info!("Exiting with status {}", status);
    Ok(ExitCode::from(status))
}
