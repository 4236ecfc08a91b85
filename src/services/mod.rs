//! Service layer for the boycott publisher.
//!
//! - List files (`BoycotterStore`, `BoycotterLists`)
//! - Section extraction (`ListExtractor`, `MarkerExtractor`)
//! - Page regeneration (`Publisher`)

mod boycotters;
mod extract;
mod publisher;

pub use boycotters::{BoycotterLists, BoycotterStore};
pub use extract::{ListExtractor, MarkerExtractor};
pub use publisher::{MUSIC_PAGE, PublishReport, Publisher, render_artist_section};
