//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use eventmate_core::config;
use eventmate_core::{ApiClient, SessionStore, logging};

mod commands;

#[derive(Parser)]
#[command(name = "eventmate")]
#[command(version)]
#[command(about = "Browse and join events from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the event API (overrides config and EVENTMATE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Browse events without the full-screen view
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Mark the session as authenticated
    Login,
    /// Clear the session
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum EventCommands {
    /// Lists every event
    List,
    /// Shows an event's description
    Show {
        /// The ID of the event
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Takes one slot of an event
    Join {
        /// The ID of the event
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = cli.api_url.as_deref() {
        config.set_api_url(url).context("Invalid --api-url")?;
    }

    // Logs go to a file; the terminal belongs to the TUI.
    let _log_guard = logging::init(&config).context("init logging")?;
    tracing::debug!(api_url = %config.api_url, "starting");

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    let store = SessionStore::default_location();

    // default to the event list view
    let Some(command) = cli.command else {
        let client = ApiClient::from_config(&config)?;
        return commands::events::browse(&config, store, client).await;
    };

    match command {
        Commands::Events { command } => {
            let client = ApiClient::from_config(&config)?;
            match command {
                EventCommands::List => commands::events::list(&client, &config).await,
                EventCommands::Show { id } => commands::events::show(&client, &id).await,
                EventCommands::Join { id } => commands::events::join(&client, &id).await,
            }
        }

        Commands::Login => commands::session::login(&store),
        Commands::Logout => commands::session::logout(&store),

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
