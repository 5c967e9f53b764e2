//! CLI definitions for compose-assist.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use compose_assist_core::DEFAULT_TONE;

/// compose-assist CLI.
#[derive(Parser)]
#[command(name = "compose-assist")]
#[command(about = "Tone-aware AI reply assistant for webmail compose windows")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path; without it config/default.toml is used if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a reply for an email and print it
    Generate(GenerateArgs),

    /// List the available reply tones
    Tones {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Drive the assistant against the reference webmail page
    Simulate(SimulateArgs),
}

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Email content to reply to
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub content: Option<String>,

    /// Read the email content from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Reply tone
    #[arg(long, default_value = DEFAULT_TONE)]
    pub tone: String,

    /// Generation service base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args)]
pub(crate) struct SimulateArgs {
    /// Tone to pick in the injected selector
    #[arg(long, default_value = DEFAULT_TONE)]
    pub tone: String,

    /// Body of the email being replied to
    #[arg(long)]
    pub email: Option<String>,

    /// Generation service base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seconds to wait for the controls and for the reply
    #[arg(long, default_value_t = 90)]
    pub wait_secs: u64,
}
