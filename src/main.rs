//! `event-portal`: command-line front end for the event portal API.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use event_portal_client::config::{load_config, validation::validate_config, ConfigError};
use event_portal_client::http::handle_api_error;
use event_portal_client::lifecycle::signals::cancel_on_ctrl_c;
use event_portal_client::observability::init_logging;
use event_portal_client::{ApiClient, ApiError, CancelHandle, ClientConfig, EventId, NewEvent};

#[derive(Parser)]
#[command(name = "event-portal")]
#[command(about = "Manage events through the event portal REST API", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL (e.g. http://localhost:8080/api).
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    List {
        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// Create an event
    Create(EventArgs),
    /// Replace an existing event
    Update {
        id: i64,
        #[command(flatten)]
        event: EventArgs,
    },
    /// Delete an event
    Delete { id: i64 },
    /// Check backend health
    Health,
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Start time, e.g. 2024-01-01T10:00
    #[arg(long)]
    start: String,
    /// End time, e.g. 2024-01-01T11:00
    #[arg(long)]
    end: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value_t = 1)]
    capacity: u32,
}

impl From<EventArgs> for NewEvent {
    fn from(args: EventArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            start_time: args.start,
            end_time: args.end,
            location: args.location,
            capacity: args.capacity,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn load(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    init_logging(&config.observability)?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = ApiClient::new(&config)?;
    let cancel = CancelHandle::new();
    let signal_task = cancel_on_ctrl_c(cancel.clone());

    let outcome = run(&client, cli.command, &cancel).await;
    signal_task.abort();

    match outcome {
        Ok(Some(json)) => {
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => Ok(ExitCode::SUCCESS),
        Err(CommandError::Invalid(errors)) => {
            for err in errors {
                eprintln!("Invalid event: {}", err);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(CommandError::Api(err)) => {
            eprintln!("Error: {}", handle_api_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

enum CommandError {
    Invalid(Vec<event_portal_client::events::FieldError>),
    Api(ApiError),
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        CommandError::Api(err)
    }
}

/// Run one command; `Some` carries pretty JSON to print.
async fn run(
    client: &ApiClient,
    command: Commands,
    cancel: &CancelHandle,
) -> Result<Option<String>, CommandError> {
    let cancel = Some(cancel);
    match command {
        Commands::List { params } => {
            let res = client.list_events(&params, cancel).await?;
            Ok(Some(pretty(&res.data)))
        }
        Commands::Create(args) => {
            let draft = NewEvent::from(args);
            draft.validate().map_err(CommandError::Invalid)?;
            let res = client.create_event(&draft, cancel).await?;
            Ok(Some(pretty(&res.data)))
        }
        Commands::Update { id, event } => {
            let draft = NewEvent::from(event);
            draft.validate().map_err(CommandError::Invalid)?;
            let res = client.update_event(EventId(id), &draft, cancel).await?;
            Ok(Some(pretty(&res.data)))
        }
        Commands::Delete { id } => {
            client.delete_event(EventId(id), cancel).await?;
            eprintln!("Deleted event {}", id);
            Ok(None)
        }
        Commands::Health => {
            let res = client.health_check(cancel).await?;
            Ok(Some(pretty(&res.data)))
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
