//! RSVP API server
//!
//! Listens on a fixed port and keeps records in Redis at a fixed address.

use std::sync::Arc;

use boycott_rsvp::{
    config::{RSVP_DATABASE_NAME, RSVP_DATABASE_URL, RSVP_PORT},
    error::Result,
    server::{self, rsvp},
    storage::RedisStore,
};
use clap::Parser;

/// RSVP API server
#[derive(Parser, Debug)]
#[command(name = "rsvp-server", version, about = "RSVP API server")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = RedisStore::open(RSVP_DATABASE_URL, RSVP_DATABASE_NAME)?;
    match store.ping().await {
        Ok(()) => log::info!("Connected to Redis at {RSVP_DATABASE_URL}"),
        // Not fatal: requests report store errors individually.
        Err(e) => log::error!("Redis connection error: {e}"),
    }

    let app = rsvp::router(Arc::new(store));
    server::serve(app, RSVP_PORT).await
}
