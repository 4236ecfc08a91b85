//! Publisher configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root publisher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Page to scrape and how to carve the list out of it
    #[serde(default)]
    pub source: SourceConfig,

    /// Proxy server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Local file names, relative to the storage directory
    #[serde(default)]
    pub files: FilesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override the listen port from a `PORT`-style value, if it parses.
    pub fn apply_port_override(&mut self, value: Option<String>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(e) => log::warn!("Ignoring invalid PORT value {raw:?}: {e}"),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.source.url)?;
        if self.source.start_marker.is_empty() || self.source.end_marker.is_empty() {
            return Err(AppError::validation("source markers must not be empty"));
        }
        url::Url::parse(&self.server.allowed_origin)?;
        if self.files.artist_list.trim().is_empty()
            || self.files.label_list.trim().is_empty()
            || self.files.output_file.trim().is_empty()
        {
            return Err(AppError::validation("files.* entries must not be empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            source: SourceConfig::default(),
            server: ServerConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Boycott list source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "defaults::source_url")]
    pub url: String,

    /// Text that opens the artist section
    #[serde(default = "defaults::start_marker")]
    pub start_marker: String,

    /// Text that closes the artist section
    #[serde(default = "defaults::end_marker")]
    pub end_marker: String,

    /// Separator between names inside the section
    #[serde(default = "defaults::delimiter")]
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::source_url(),
            start_marker: defaults::start_marker(),
            end_marker: defaults::end_marker(),
            delimiter: defaults::delimiter(),
        }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// The one front-end origin allowed to call the proxy
    #[serde(default = "defaults::allowed_origin")]
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            allowed_origin: defaults::allowed_origin(),
        }
    }
}

/// Local file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "defaults::artist_list")]
    pub artist_list: String,

    #[serde(default = "defaults::label_list")]
    pub label_list: String,

    /// Generated HTML page
    #[serde(default = "defaults::output_file")]
    pub output_file: String,
}

impl FilesConfig {
    pub fn artist_path(&self, root: &Path) -> PathBuf {
        root.join(&self.artist_list)
    }

    pub fn label_path(&self, root: &Path) -> PathBuf {
        root.join(&self.label_list)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_file)
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            artist_list: defaults::artist_list(),
            label_list: defaults::label_list(),
            output_file: defaults::output_file(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; boycott-publisher/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Source defaults
    pub fn source_url() -> String {
        "https://nomusicforgenocide.org/page-3-full-list".into()
    }
    pub fn start_marker() -> String {
        "ARTISTS".into()
    }
    // Kept verbatim, stray character included; the live page may not contain it.
    pub fn end_marker() -> String {
        "LABELSß".into()
    }
    pub fn delimiter() -> char {
        '·'
    }

    // Server defaults
    pub fn port() -> u16 {
        3000
    }
    pub fn allowed_origin() -> String {
        "https://nesma-belkhodja.github.io".into()
    }

    // File defaults
    pub fn artist_list() -> String {
        "artist_boycotters.txt".into()
    }
    pub fn label_list() -> String {
        "label_boycotters.txt".into()
    }
    pub fn output_file() -> String {
        "music.html".into()
    }
}
