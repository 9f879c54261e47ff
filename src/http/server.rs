//! HTTP server for the explorer API and static assets

use super::handler::{domains_handler, graph_handler, status_handler};
use crate::store::RowSource;
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> impl IntoResponse {
    // Embedded at compile time, present by construction
    let index_html = Assets::get("index.html").unwrap();
    Html(std::str::from_utf8(index_html.data.as_ref()).unwrap().to_string())
}

/// Build the explorer router over any row source
pub fn router(source: Arc<dyn RowSource>) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/domains", get(domains_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(source)
}

/// HTTP server managing the explorer API and static assets
pub struct HttpServer {
    source: Arc<dyn RowSource>,
    address: String,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(source: Arc<dyn RowSource>, address: String, port: u16) -> Self {
        Self {
            source,
            address,
            port,
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.source));

        let addr = format!("{}:{}", self.address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Explorer available at http://localhost:{}", self.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
