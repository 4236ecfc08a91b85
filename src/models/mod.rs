// src/models/mod.rs

//! Domain models shared by the publisher and the RSVP service.

mod config;
mod rsvp;

// Re-export all public types
pub use config::{Config, FilesConfig, HttpConfig, ServerConfig, SourceConfig};
pub use rsvp::{FieldError, FieldProblem, NewRsvp, Rsvp, validate_rsvp};

/// Which boycotter list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ListKind {
    Artists,
    Labels,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Artists => "artists",
            ListKind::Labels => "labels",
        }
    }
}
