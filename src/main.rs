use anyhow::Result;
use bookdash::application::{ServerConfig, serve};
use bookdash::infrastructure::sheets::GoogleSheetsSource;
use bookdash::presentation::cli::{Cli, Commands, stats};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let sheets = cli.sheets_config();

    match cli.command {
        Commands::Serve(cmd) => {
            serve(ServerConfig {
                bind_address: cmd.bind_address,
                sheets,
            })
            .await
        }
        Commands::Summary => {
            let source = GoogleSheetsSource::new(sheets)?;
            stats::summary(&source, cli.strict).await
        }
        Commands::Monthly(cmd) => {
            let source = GoogleSheetsSource::new(sheets)?;
            stats::monthly(&source, cli.strict, cmd.unsorted).await
        }
        Commands::Categories => {
            let source = GoogleSheetsSource::new(sheets)?;
            stats::categories(&source, cli.strict).await
        }
        Commands::Dashboard => {
            let source = GoogleSheetsSource::new(sheets)?;
            stats::dashboard(&source, cli.strict).await
        }
    }
}

// Logs go to stderr so JSON on stdout stays parseable.
#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
