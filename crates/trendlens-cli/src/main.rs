use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// trendlens — edit product details and analyse market trends from the terminal.
///
/// Loads a product from the local catalog, lets you edit its trend search
/// texts, links and description, asks the trend service for suggestions and
/// renders the resulting trend report and plot.
#[derive(Parser, Debug)]
#[command(name = "trendlens", version, about)]
struct Cli {
    /// Product id to open (the route parameter).
    #[arg(short, long, default_value_t = 1)]
    product: i64,

    /// Path to the product catalog JSON (overrides the config file).
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Base URL of the trend service (overrides the config file).
    #[arg(long)]
    backend_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, discard logs rather than writing to the alternate screen.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trendlens");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("trendlens.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config.
    let mut config = trendlens_core::TrendlensConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        trendlens_core::TrendlensConfig::default()
    });
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    tracing::info!("Starting trendlens v{}", env!("CARGO_PKG_VERSION"));

    let mut app = trendlens_tui::App::new(&config, cli.product);
    app.run().await?;

    tracing::info!("trendlens exited cleanly");
    Ok(())
}
