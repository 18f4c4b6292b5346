//! Box-shadow editor command-line front end
//!
//! Every invocation re-opens the editor over a state directory that stands in
//! for browser local storage and the page URL, runs one command and exits.

mod commands;
mod location;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shadows")]
#[command(version, about = "Compose layered CSS box-shadows", long_about = None)]
pub struct Cli {
    /// Directory holding history, settings and the current URL
    #[arg(long, value_name = "DIR", default_value = ".shadows")]
    pub state_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the layers, background, URL and history position
    Show,
    /// Print the CSS declaration
    Css {
        /// Add -webkit- and -moz- prefixed copies
        #[arg(long)]
        prefixed: bool,
    },
    /// Append a default layer
    Add,
    /// Append a copy of a layer
    Duplicate { id: u32 },
    /// Remove a layer
    Delete { id: u32 },
    /// Show or hide a layer
    Toggle { id: u32 },
    /// Change fields of a layer
    Set {
        id: u32,
        #[arg(long)]
        angle: Option<i32>,
        #[arg(long)]
        distance: Option<u32>,
        #[arg(long)]
        blur: Option<u32>,
        #[arg(long, allow_hyphen_values = true)]
        spread: Option<i32>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        opacity: Option<u8>,
    },
    /// Set the page background
    Background {
        color: String,
        #[arg(long, default_value_t = 100)]
        opacity: u8,
    },
    /// Replace the layers with a built-in preset
    Preset { name: String },
    /// List built-in presets
    Presets,
    /// Remove every layer
    Clear,
    Undo,
    Redo,
    /// Load a shared link's query string, e.g. `s=...` or `css=...`
    Open { query: String },
    /// Print the history log
    History {
        /// Empty the log instead
        #[arg(long)]
        clear: bool,
    },
    /// Show or change preview card settings
    Preview {
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
        #[arg(long)]
        items: Option<u32>,
        /// Restore the defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ViewArg {
    Grid,
    Varied,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::debug!("Using state directory {}", cli.state_dir.display());

    let output = commands::run(cli.command, &cli.state_dir)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
