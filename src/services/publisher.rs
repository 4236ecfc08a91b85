// src/services/publisher.rs

//! Boycott page fetcher and static page publisher.
//!
//! Fetches the source page, extracts the artist list, renders an artist
//! section and writes `music.html`. The rendered section is NOT placed in the
//! written page: the page is a fixed skeleton whose `#artist-boycotters` div
//! is filled client-side by `tool.js`.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::Config;
use crate::services::extract::{ListExtractor, MarkerExtractor};
use crate::storage::TextFs;
use crate::utils::http;

/// The page written on every publish.
pub const MUSIC_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Music</title>
  <script src="tool.js" defer></script>
</head>
<body id="music-page">
  <h1 id="page-title">Welcome to the Music Page</h1>
  <div id="artist-boycotters"></div>
</body>
</html>"#;

/// What a publish run produced.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Names extracted from the source page
    pub extracted: Vec<String>,
    /// Rendered artist section (not written to the page)
    pub artist_section: String,
    pub output_path: PathBuf,
}

/// Render the artist section for a list of names.
pub fn render_artist_section(names: &[String]) -> String {
    format!(
        "\n      <div>\n        <h2>Artist Boycotters</h2>\n        {}\n      </div>\n    ",
        names.join(" · ")
    )
}

/// Service that regenerates the static music page.
pub struct Publisher {
    client: Client,
    source_url: String,
    extractor: Arc<dyn ListExtractor>,
    fs: Arc<dyn TextFs>,
    output_path: PathBuf,
}

impl Publisher {
    pub fn new(
        client: Client,
        source_url: impl Into<String>,
        extractor: Arc<dyn ListExtractor>,
        fs: Arc<dyn TextFs>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            source_url: source_url.into(),
            extractor,
            fs,
            output_path: output_path.into(),
        }
    }

    /// Build a publisher from configuration, rooted at `root`.
    pub fn from_config(
        config: &Config,
        client: Client,
        fs: Arc<dyn TextFs>,
        root: &std::path::Path,
    ) -> Self {
        Self::new(
            client,
            &config.source.url,
            Arc::new(MarkerExtractor::from_config(&config.source)),
            fs,
            config.files.output_path(root),
        )
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch the source page and rewrite the output file.
    ///
    /// Any response is accepted, error statuses included. Nothing is written
    /// if the request itself fails.
    pub async fn fetch_and_publish(&self) -> Result<PublishReport> {
        let html = http::fetch_body(&self.client, &self.source_url).await?;

        let extracted = self.extractor.extract(&html);
        let artist_section = render_artist_section(&extracted);
        log::debug!(
            "Extracted {} artist entries ({} bytes rendered)",
            extracted.len(),
            artist_section.len()
        );

        self.fs.write(&self.output_path, MUSIC_PAGE).await?;
        log::info!("{} updated successfully!", self.output_path.display());

        Ok(PublishReport {
            extracted,
            artist_section,
            output_path: self.output_path.clone(),
        })
    }

    /// Publish once, logging instead of propagating failures.
    pub async fn publish_logged(&self) -> Option<PublishReport> {
        match self.fetch_and_publish().await {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("Failed to fetch artist boycotters: {e}");
                None
            }
        }
    }
}
