//! Boycott-list publisher CLI
//!
//! Maintains the local artist/label lists, regenerates `music.html` and runs
//! the `/api/artists` CORS proxy.

use std::path::PathBuf;
use std::sync::Arc;

use boycott_rsvp::{
    config::load_publisher_config,
    error::Result,
    models::ListKind,
    server::{self, artists},
    services::{BoycotterLists, BoycotterStore, Publisher},
    storage::{LocalFs, TextFs},
    utils::http,
};
use clap::{Parser, Subcommand};

/// Names seeded by the `run` command.
const SAMPLE_ARTISTS: [&str; 2] = ["New Artist 1", "New Artist 2"];
const SAMPLE_LABELS: [&str; 2] = ["New Label 1", "New Label 2"];

/// Boycott-list publisher and proxy
#[derive(Parser, Debug)]
#[command(name = "boycott-publisher", version, about = "Boycott-list publisher and proxy")]
struct Cli {
    /// Directory holding config.toml, the list files and the generated page
    #[arg(short, long, default_value = ".")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the /api/artists proxy server
    Serve,

    /// Fetch the source page and regenerate the output page once
    Publish,

    /// Add names to a boycotter list
    Add {
        #[arg(value_enum)]
        list: ListKind,

        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print both boycotter lists
    Show,

    /// Validate configuration
    Validate,

    /// Add sample names, publish, print the lists, then serve
    Run,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the publisher.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_publisher_config(&cli.storage_dir);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let fs: Arc<dyn TextFs> = Arc::new(LocalFs);
    let store = BoycotterStore::new(fs.clone());
    let lists = BoycotterLists::from_config(store, &config, &cli.storage_dir);

    match cli.command {
        Command::Serve => {
            let app = artists::router_from_config(&config)?;
            server::serve(app, config.server.port).await?;
        }

        Command::Publish => {
            let client = http::create_async_client(&config.http)?;
            let publisher = Publisher::from_config(&config, client, fs, &cli.storage_dir);
            if let Some(report) = publisher.publish_logged().await {
                log::info!(
                    "Extracted {} entries; wrote {}",
                    report.extracted.len(),
                    report.output_path.display()
                );
            }
        }

        Command::Add { list, names } => {
            let updated = lists.add(list, &names).await?;
            log::info!("{} list now has {} names", list.as_str(), updated.len());
        }

        Command::Show => {
            print_lists(&lists).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Run => {
            let app = artists::router_from_config(&config)?;

            lists.add(ListKind::Artists, &SAMPLE_ARTISTS).await?;
            lists.add(ListKind::Labels, &SAMPLE_LABELS).await?;

            let client = http::create_async_client(&config.http)?;
            let publisher = Publisher::from_config(&config, client, fs, &cli.storage_dir);
            publisher.publish_logged().await;

            print_lists(&lists).await?;

            server::serve(app, config.server.port).await?;
        }
    }

    Ok(())
}

async fn print_lists(lists: &BoycotterLists) -> Result<()> {
    for kind in [ListKind::Artists, ListKind::Labels] {
        let names = lists.read(kind).await?;
        log::info!("{} boycotters ({}):", kind.as_str(), names.len());
        for name in names {
            log::info!("    {}", name);
        }
    }
    Ok(())
}
