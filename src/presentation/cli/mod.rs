pub mod stats;

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::infrastructure::sheets::{
    DEFAULT_RANGE, DEFAULT_SPREADSHEET_ID, SHEETS_API_URL, SheetsConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Reading and purchase statistics from a Google Sheet", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKDASH_SHEETS_URL",
        default_value = SHEETS_API_URL
    )]
    pub sheets_url: String,

    #[arg(
        long,
        global = true,
        env = "BOOKDASH_GOOGLE_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        global = true,
        env = "BOOKDASH_SPREADSHEET_ID",
        default_value = DEFAULT_SPREADSHEET_ID
    )]
    pub spreadsheet_id: String,

    #[arg(long, global = true, env = "BOOKDASH_RANGE", default_value = DEFAULT_RANGE)]
    pub range: String,

    /// Fail instead of reporting empty statistics when the sheet cannot be read
    #[arg(long, global = true, env = "BOOKDASH_STRICT")]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig {
            base_url: self.sheets_url.clone(),
            api_key: self.api_key.clone(),
            spreadsheet_id: self.spreadsheet_id.clone(),
            range: self.range.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the web dashboard
    Serve(ServeCommand),

    /// Print headline totals
    Summary,

    /// Print per-month purchase and reading statistics
    Monthly(MonthlyCommand),

    /// Print per-category counts and spend
    Categories,

    /// Print everything the web dashboard shows
    Dashboard,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "BOOKDASH_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,
}

#[derive(Debug, Args)]
pub struct MonthlyCommand {
    /// Keep months in the order they first appear in the sheet
    #[arg(long)]
    pub unsorted: bool,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
