// src/lib.rs

//! Boycott-list publisher and RSVP service library.
//!
//! Two unrelated services share this crate:
//! - the publisher scrapes a boycott list page, regenerates `music.html`,
//!   keeps the local artist/label lists and proxies the source page;
//! - the RSVP service exposes a small CRUD API over a document store.

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
