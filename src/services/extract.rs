// src/services/extract.rs

//! Pulling a name list out of raw HTML.

use crate::models::SourceConfig;

/// Turns a fetched page into a list of names.
pub trait ListExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Vec<String>;
}

/// Marker-based extraction: take the text between two literal anchors and
/// split it on a delimiter.
///
/// Anchor lookup is deliberately loose. A marker that is not found counts as
/// offset 0, and if the start lands after the end the two are swapped. A
/// page that changes its wording therefore yields an empty or wrong slice
/// rather than an error.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    pub start_marker: String,
    pub end_marker: String,
    pub delimiter: char,
}

impl MarkerExtractor {
    pub fn new(
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        delimiter: char,
    ) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            delimiter,
        }
    }

    pub fn from_config(source: &SourceConfig) -> Self {
        Self::new(&source.start_marker, &source.end_marker, source.delimiter)
    }

    /// The raw section between the markers, start marker included.
    pub fn section<'a>(&self, html: &'a str) -> &'a str {
        let start = html.find(&self.start_marker).unwrap_or(0);
        let end = html.find(&self.end_marker).unwrap_or(0);
        let (from, to) = if start <= end { (start, end) } else { (end, start) };
        // Both offsets come from `find` or are 0, so they sit on char boundaries.
        html.get(from..to).unwrap_or_default()
    }
}

impl ListExtractor for MarkerExtractor {
    fn extract(&self, html: &str) -> Vec<String> {
        self.section(html)
            .split(self.delimiter)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> MarkerExtractor {
        MarkerExtractor::new("ARTISTS", "LABELS", '·')
    }

    #[test]
    fn test_extracts_between_markers() {
        let html = "<p>intro</p>ARTISTS · Alpha · Beta  ·  · Gamma LABELS · Nope";
        assert_eq!(
            extractor().extract(html),
            vec!["ARTISTS", "Alpha", "Beta", "Gamma"]
        );
    }

    #[test]
    fn test_missing_end_marker_takes_prefix() {
        let html = "Header · Lead ARTISTS · Alpha";
        assert_eq!(extractor().section(html), "Header · Lead ");
        assert_eq!(extractor().extract(html), vec!["Header", "Lead"]);
    }

    #[test]
    fn test_reordered_markers_swap() {
        let html = "LABELS · One · Two ARTISTS · Three";
        assert_eq!(extractor().section(html), "LABELS · One · Two ");
    }

    #[test]
    fn test_no_markers_is_empty() {
        assert!(extractor().extract("nothing to see · here").is_empty());
    }

    #[test]
    fn test_default_markers_on_live_like_page() {
        let extractor = MarkerExtractor::from_config(&SourceConfig::default());
        let html = "menu ARTISTS\nA · B · C\nLABELSß\nX · Y";
        assert_eq!(extractor.extract(html), vec!["ARTISTS\nA", "B", "C"]);
    }
}
