//! Breezy terminal chat client entry point.
//!
//! Binary name: `breezy`
//!
//! Parses CLI arguments, sets up logging, layers configuration (defaults,
//! config file, flags and environment), then starts a chat session or runs
//! the requested subcommand.

mod cli;

use clap::Parser;
use clap_complete::generate;

use breezy_infra::config::{default_config_path, load_client_config};
use breezy_observe::tracing_setup::{init_tracing, shutdown_tracing};
use breezy_types::config::ClientConfig;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or config
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "breezy", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.log_directives(), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let mut config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => load_client_config(&path).await,
        None => ClientConfig::default(),
    };
    cli.apply_overrides(&mut config);
    tracing::debug!(
        host = %config.host,
        model = %config.model,
        provider = %config.provider,
        "Resolved configuration"
    );

    let api_key = cli.api_key.as_deref();
    let outcome = match cli.command {
        None | Some(Commands::Chat) => cli::chat::run_chat(&config, api_key).await.map(|()| true),
        Some(Commands::Check) => cli::check::run_check(&config, api_key, cli.json).await,
        Some(Commands::Completions { .. }) => Ok(true),
    };

    shutdown_tracing();

    if !outcome? {
        std::process::exit(1);
    }
    Ok(())
}
