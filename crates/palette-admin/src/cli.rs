use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Admin-surface driver for the Design Palette Pro CSS export feature.
#[derive(Parser, Debug)]
#[command(name = "palette-admin", version, about)]
pub struct Args {
    /// State directory holding the settings store and token key.
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Settings page URL the export section links back to.
    #[arg(long, default_value = "admin.php?page=genesis-palette-pro")]
    pub settings_url: String,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the settings section with a freshly tokened export link.
    Link,

    /// Run the export flow for an incoming request query string.
    Export {
        /// Query string of the incoming request.
        #[arg(long)]
        query: String,

        /// Write the stylesheet here instead of dumping the response.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render the failure notice for a settings-page load, if any.
    Notices {
        /// Query string of the page load.
        #[arg(long)]
        query: String,
    },

    /// Evaluate the companion gate for an admin screen.
    Gate {
        /// Screen identifier.
        #[arg(long, default_value = "plugins")]
        screen: String,
    },

    /// Show store location, saved-settings state, and companion activity.
    Status,
}

pub fn parse() -> Args {
    Args::parse()
}
