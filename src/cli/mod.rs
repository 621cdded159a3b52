// ABOUTME: CLI argument parsing and command routing for evory-admin
//
// Provides command-line access to the portal backend:
// - Listing and searching companies (companies)
// - Listing a company's clients (clients)
// - Activating/deactivating a client (toggle-client)
// - Exporting reports to .xlsx (report)
// - Launching the TUI (tui, default)

pub mod clients;
pub mod companies;
pub mod report;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::ReportKind;

/// Evory Drive admin console
#[derive(Parser)]
#[command(name = "evory-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// List or search companies
    Companies(CompaniesArgs),

    /// List the clients of a company
    Clients(ClientsArgs),

    /// Activate or deactivate a client
    ToggleClient(ToggleClientArgs),

    /// Export a report to an .xlsx file
    Report(ReportArgs),
}

/// Arguments for the companies command
#[derive(clap::Args)]
pub struct CompaniesArgs {
    /// Search term (name, NIT or razón social) instead of listing all
    #[arg(long, short)]
    pub search: Option<String>,
}

/// Arguments for the clients command
#[derive(clap::Args)]
pub struct ClientsArgs {
    /// Company ID
    pub company_id: i64,
}

/// Arguments for the toggle-client command
#[derive(clap::Args)]
pub struct ToggleClientArgs {
    /// Client ID
    pub client_id: i64,

    /// New state: true activates, false deactivates
    #[arg(long)]
    pub activo: bool,
}

/// Arguments for the report command
#[derive(clap::Args)]
pub struct ReportArgs {
    /// Report kind: servicios, ingresos or novedades
    pub kind: ReportKind,

    /// Company ID
    #[arg(long)]
    pub company: i64,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Output directory (defaults to the configured download dir)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
