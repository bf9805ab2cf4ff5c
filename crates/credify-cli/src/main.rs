//! Credify CLI - Command-line client for the Credify fact-checking service.

use clap::Parser;
use credify_cli::commands;
use credify_cli::repl;
use credify_cli::{Cli, Command, Config, Formatter};
use credify_sdk::CredifyClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Returns `Ok(false)` when a one-shot command settled in `Failure`.
async fn run() -> credify_cli::Result<bool> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let mut config = Config::load_or_init(&config_path)?;
    debug!(path = %config_path.display(), "Config loaded");

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            // Enter REPL mode
            repl::run_repl(&mut config, cli.api_url, &formatter).await?;
            Ok(true)
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
            Ok(true)
        }
        Some(cmd) => {
            // Commands that talk to the service
            let client = CredifyClient::from_config(&config.client_config(cli.api_url.as_deref())?)?;
            debug!(api_url = client.base_url(), "Using service");

            match cmd {
                Command::Verify(args) => {
                    let screen = commands::execute_verify(args, &client, &formatter).await?;
                    Ok(!screen.state().is_failure())
                }
                Command::History(args) => {
                    let screen = commands::execute_history(args, &client, config.history_limit(), &formatter).await?;
                    Ok(!screen.state().is_failure())
                }
                Command::Show(args) => {
                    let screen = commands::execute_show(args, &client, &formatter).await?;
                    Ok(!screen.state().is_failure())
                }
                Command::Health => {
                    commands::execute_health(&client, &formatter).await?;
                    Ok(true)
                }
                Command::Profile(_) | Command::Repl => Ok(true),
            }
        }
    }
}
