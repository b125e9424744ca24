mod api;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod countdown;
mod debounce;
mod environment;
mod error_classifier;
mod events;
mod export;
mod filters;
mod logging;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::api::ApiClient;
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::filters::FilterState;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Monitor API base URL, overriding the environment and config file
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Match filter flags shared by `start` and `export`.
#[derive(clap::Args)]
struct FilterArgs {
    /// Restrict to these keyword ids (repeatable)
    #[arg(long = "keyword-id", value_name = "ID")]
    keyword_ids: Vec<String>,

    /// Inclusive ISO date lower bound (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// Inclusive ISO date upper bound (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// Free-text search over matched values
    #[arg(long)]
    search: Option<String>,

    /// Only matches first seen in the latest cycle
    #[arg(long)]
    new_only: bool,
}

impl FilterArgs {
    fn into_filters(self) -> FilterState {
        FilterState {
            keyword_ids: self.keyword_ids,
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            search: self.search.unwrap_or_default(),
            new_only: self.new_only,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        /// Log events to stdout instead of drawing the TUI
        #[arg(long)]
        headless: bool,

        /// Disable the dashboard background color
        #[arg(long)]
        no_background: bool,

        /// Directory CSV exports are written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Manage monitored keywords
    Keywords {
        #[command(subcommand)]
        command: KeywordsCommand,
    },
    /// Export the filtered match set as CSV
    Export {
        /// Directory the CSV file is written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Save connection settings to the config file
    Configure {
        /// Monitor API base URL to persist
        #[arg(long, value_name = "URL")]
        url: String,

        /// Default export directory to persist
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },
    /// Clear the saved configuration
    Reset,
}

#[derive(Subcommand)]
enum KeywordsCommand {
    /// List configured keywords
    List,
    /// Add a keyword
    Add {
        /// The brand term to monitor
        #[arg(long)]
        value: String,
    },
    /// Remove a keyword by id
    Remove {
        /// Keyword id to remove
        #[arg(long)]
        id: String,
    },
}

/// Resolve the environment: explicit URL flag, then the
/// CTWATCH_ENVIRONMENT variable, then the config file, then local.
fn resolve_environment(api_url: Option<String>, stored: Option<&Config>) -> Environment {
    let from_env = std::env::var("CTWATCH_ENVIRONMENT")
        .ok()
        .and_then(|value| value.parse::<Environment>().ok());
    let fallback = from_env
        .or_else(|| {
            stored.map(|config| Environment::Custom {
                api_base_url: config.api_base_url.clone(),
            })
        })
        .unwrap_or_default();
    Environment::from_url_override(api_url, fallback)
}

/// Resolve the export directory: explicit flag, then the config file,
/// then the current directory.
fn resolve_export_dir(flag: Option<PathBuf>, stored: Option<&Config>) -> PathBuf {
    flag.or_else(|| {
        stored
            .filter(|config| !config.export_dir.is_empty())
            .map(|config| PathBuf::from(&config.export_dir))
    })
    .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    let stored_config = Config::load_from_file(&config_path).ok();
    let environment = resolve_environment(args.api_url, stored_config.as_ref());

    match args.command {
        Command::Start {
            headless,
            no_background,
            export_dir,
            filters,
        } => {
            let api = ApiClient::new(environment)?;
            let export_dir = resolve_export_dir(export_dir, stored_config.as_ref());
            let session = setup_session(api, export_dir, filters.into_filters())?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, !no_background).await
            }
        }
        Command::Keywords { command } => {
            let api = ApiClient::new(environment)?;
            match command {
                KeywordsCommand::List => commands::keywords::run_list(&api).await,
                KeywordsCommand::Add { value } => commands::keywords::run_add(&api, &value).await,
                KeywordsCommand::Remove { id } => commands::keywords::run_remove(&api, &id).await,
            }
        }
        Command::Export {
            export_dir,
            filters,
        } => {
            let api = ApiClient::new(environment)?;
            let export_dir = resolve_export_dir(export_dir, stored_config.as_ref());
            commands::export::run_export(&api, filters.into_filters(), &export_dir).await
        }
        Command::Configure { url, export_dir } => {
            let config = Config::new(
                url.trim_end_matches('/').to_string(),
                export_dir
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_default(),
            );
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        Command::Reset => {
            println!("Clearing saved configuration...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}
