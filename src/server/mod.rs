//! HTTP surfaces.
//!
//! - `artists`: CORS proxy for the boycott source page
//! - `rsvp`: RSVP CRUD API

pub mod artists;
pub mod error;
pub mod rsvp;

use axum::Router;
use tokio::net::TcpListener;

use crate::error::Result;
use crate::utils::shutdown::shutdown_signal;

/// Bind `0.0.0.0:{port}` and serve `app` until a shutdown signal arrives.
pub async fn serve(app: Router, port: u16) -> Result<()> {
    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    log::info!("Server running at http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shut down");
    Ok(())
}
