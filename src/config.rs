// src/config.rs

//! Configuration loading utilities.
//!
//! The publisher reads `{storage_dir}/config.toml` and honours `PORT`.
//! The RSVP service has no external configuration: its port and database
//! connection string are fixed.

use std::path::Path;

use crate::models::Config;

/// Port the RSVP service listens on.
pub const RSVP_PORT: u16 = 5000;

/// Connection string of the RSVP database.
pub const RSVP_DATABASE_URL: &str = "redis://127.0.0.1:6379/";

/// Key namespace for RSVP records.
pub const RSVP_DATABASE_NAME: &str = "rsvpDB";

/// Environment variable that overrides the publisher port.
pub const PORT_ENV: &str = "PORT";

/// Load the publisher configuration from a storage directory.
///
/// Falls back to defaults if the file is missing or invalid, then applies
/// the `PORT` override.
pub fn load_publisher_config(storage_dir: &Path) -> Config {
    let mut config = Config::load_or_default(storage_dir.join("config.toml"));
    config.apply_port_override(std::env::var(PORT_ENV).ok());
    config
}
