//! termfolio CLI
//!
//! Browse the portfolio in the terminal, or poke its persisted
//! theme and contact relay from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use clap::{Parser, Subcommand};

use termfolio::content;
use termfolio::form::{MSG_NETWORK, MSG_REJECTED, MSG_SENT};
use termfolio::relay::{FormRelay, HttpRelay};
use termfolio::storage::ThemeStore;
use termfolio::tui;
use termfolio::types::{ContactFields, SubmitOutcome, Theme};

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "A personal portfolio page in the terminal")]
#[command(version)]
struct Cli {
    /// Override the contact form relay endpoint
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Override the settings directory
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the portfolio (default)
    View,

    /// Show or set the persisted color theme
    Theme {
        /// dark or light; omit to print the current theme
        value: Option<ThemeArg>,
    },

    /// Send a message through the contact form relay
    Send {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Reply-to email address
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(ThemeStore::default_dir);
    let store = ThemeStore::new(&dir);

    let result = match cli.command {
        None | Some(Commands::View) => cmd_view(store, cli.endpoint),
        Some(Commands::Theme { value }) => cmd_theme(&store, value.map(Theme::from)),
        Some(Commands::Send {
            name,
            email,
            message,
        }) => cmd_send(cli.endpoint, ContactFields { name, email, message }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_view(store: ThemeStore, endpoint: Option<String>) -> Result<(), String> {
    let mut site = content::default_site();
    if let Some(endpoint) = endpoint {
        site.form_endpoint = endpoint;
    }

    let year = chrono::Local::now().year();
    let app = tui::App::new(site, store, year);
    tui::run(app).map_err(|e| e.to_string())
}

fn cmd_theme(store: &ThemeStore, value: Option<Theme>) -> Result<(), String> {
    match value {
        Some(theme) => {
            store.save(theme).map_err(|e| e.to_string())?;
            println!("{}", theme);
        }
        None => {
            // Unset reads as the dark default, same as the page.
            println!("{}", store.load().unwrap_or(Theme::Dark));
        }
    }
    Ok(())
}

fn cmd_send(endpoint: Option<String>, fields: ContactFields) -> Result<(), String> {
    let endpoint = endpoint.unwrap_or_else(|| content::default_site().form_endpoint);
    eprintln!("Posting to {}", endpoint);

    let relay = HttpRelay::new();
    match relay.post(&endpoint, &fields) {
        SubmitOutcome::Sent => {
            println!("{}", MSG_SENT);
            Ok(())
        }
        SubmitOutcome::Rejected(Some(details)) => Err(details),
        SubmitOutcome::Rejected(None) => Err(MSG_REJECTED.to_owned()),
        SubmitOutcome::NetworkFailed => Err(MSG_NETWORK.to_owned()),
    }
}
