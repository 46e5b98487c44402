use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::api::{ApiClient, CredentialProvider, HistoryBackend, StaticToken, TokenFile};
use crate::chat::ChatSession;
use crate::chat::session::FAILURE_MARKER;
use crate::config::Config;
use crate::history::{HistoryViewer, render_record};
use crate::logging;
use crate::models::{Page, Place};
use crate::parsers::load_places;
use crate::tui;
use crate::utils::sanitize_for_terminal;

#[derive(Parser)]
#[command(name = "travel-mate")]
#[command(version)]
#[command(about = "Terminal client for the Travel Mate tourism assistant", long_about = None)]
pub struct Cli {
    /// Session token (takes precedence over the token file)
    #[arg(long, global = true, env = "TRAVEL_MATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the chat and history endpoints
    #[arg(long, global = true)]
    pub assistant_url: Option<String>,

    /// Base URL of the user endpoints
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// JSON array of places given to the chatbot as context
    #[arg(long, global = true)]
    pub places: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse past conversations interactively
    History,
    /// Chat with the tourism assistant interactively
    Chat,
    /// Print one page of past conversations
    HistoryList {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete a past conversation
    HistoryDelete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Ask the assistant a single question
    Ask { message: String },
    /// Show the user profile
    Profile,
    /// Update the user profile from a JSON object
    ProfileUpdate { json: String },
    /// Show activity logs, optionally filtered
    Logs {
        #[arg(value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },
    /// List liked places
    Liked,
    /// Rate a place
    Like {
        place_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },
    /// Remove a place from the liked list
    Unlike { place_id: String },
}

impl Commands {
    fn is_interactive(&self) -> bool {
        matches!(self, Commands::History | Commands::Chat)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    // The alternate screen owns stdout/stderr while a screen is up
    let _guard = if command.is_interactive() {
        Some(logging::init_file()?)
    } else {
        logging::init_stderr();
        None
    };

    let config = resolve_config(&cli)?;
    let credentials = credentials(&cli, &config)?;
    let assistant = ApiClient::new(&config.assistant_url, Arc::clone(&credentials))?;
    let users = ApiClient::new(&config.api_url, credentials)?;

    match command {
        Commands::History => {
            let history = Arc::new(assistant);
            tokio::task::block_in_place(|| {
                tui::run_history(history.clone(), history, config.page_size)
            })?;
        }
        Commands::Chat => {
            let places = places(&config)?;
            let backend = Arc::new(assistant);
            tokio::task::block_in_place(|| tui::run_chat(backend.clone(), backend, places))?;
        }
        Commands::HistoryList { page } => list_history(&assistant, config.page_size, *page).await?,
        Commands::HistoryDelete { id, yes } => delete_history(&assistant, id, *yes).await?,
        Commands::Ask { message } => ask(&assistant, places(&config)?, message).await?,
        Commands::Profile => print_json(&users.get_profile().await?)?,
        Commands::ProfileUpdate { json } => {
            let data: Value = serde_json::from_str(json).context("Invalid profile JSON")?;
            print_json(&users.update_profile(&data).await?)?;
        }
        Commands::Logs { filters } => print_json(&users.get_user_logs(filters).await?)?,
        Commands::Liked => print_json(&users.get_liked_places().await?)?,
        Commands::Like { place_id, rating } => {
            print_json(&users.like_place(place_id, *rating).await?)?
        }
        Commands::Unlike { place_id } => print_json(&users.unlike_place(place_id).await?)?,
    }

    Ok(())
}

/// Config file and environment, overridden by flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = &cli.assistant_url {
        config.assistant_url = url.clone();
    }
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.places {
        config.places_file = Some(path.clone());
    }
    Ok(config)
}

fn credentials(cli: &Cli, config: &Config) -> Result<Arc<dyn CredentialProvider>> {
    let token = StaticToken::new(cli.token.clone());
    if token.token().is_some() {
        return Ok(Arc::new(token));
    }
    Ok(Arc::new(TokenFile::new(config.token_path()?)))
}

fn places(config: &Config) -> Result<Vec<Place>> {
    match &config.places_file {
        Some(path) => load_places(path),
        None => Ok(Vec::new()),
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fetch page `number` directly; a page past the end is re-fetched as the last page.
async fn fetch_page(client: &ApiClient, page_size: u32, number: u32) -> Result<Page> {
    let mut number = number.max(1);
    let mut response = client.fetch_history(number, page_size).await?;
    if number > response.total_pages() {
        number = response.total_pages();
        response = client.fetch_history(number, page_size).await?;
    }
    Ok(Page::from_response(number, response))
}

async fn list_history(client: &ApiClient, page_size: u32, page: u32) -> Result<()> {
    let page = fetch_page(client, page_size, page).await?;

    if page.is_empty() {
        println!("No chat history yet");
        return Ok(());
    }

    let now = Utc::now();
    println!("Page {} of {}", page.page_number, page.total_pages);
    for record in &page.items {
        let view = render_record(record, false, &now);
        println!();
        println!("[{}] {}", view.id, view.time);
        println!("  You: {}", sanitize_for_terminal(&view.prompt));
        println!("  AI:  {}", sanitize_for_terminal(&view.response));
    }
    Ok(())
}

async fn delete_history(client: &ApiClient, id: &str, yes: bool) -> Result<()> {
    let mut viewer = HistoryViewer::default();
    let ticket = if yes {
        viewer.begin_delete(id, &mut |_: &str| true)
    } else {
        let mut input = io::stdin().lock();
        viewer.begin_delete(id, &mut |message: &str| ask_yes_no(message, &mut input))
    };
    let Some(ticket) = ticket else {
        println!("Cancelled");
        return Ok(());
    };

    let result = client.delete_history(&ticket.id).await;
    // Nothing is displayed afterwards, so the refresh ticket is dropped
    let _ = viewer.complete_delete(ticket, result);

    if let Some(notification) = viewer.drain_notifications().into_iter().next() {
        bail!("{}", notification.text);
    }
    println!("Deleted chat {}", id);
    Ok(())
}

fn ask_yes_no(message: &str, input: &mut impl BufRead) -> bool {
    print!("{} [y/N] ", message);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}

async fn ask(client: &ApiClient, places: Vec<Place>, message: &str) -> Result<()> {
    let mut session = ChatSession::new(places);
    if !session.send_message(message, client).await {
        bail!("Message is empty");
    }

    let answer = sanitize_for_terminal(&session.transcript().latest().content);
    if answer.starts_with(FAILURE_MARKER) {
        bail!("{}", answer);
    }
    println!("{}", answer);
    Ok(())
}
