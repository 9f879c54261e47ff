use dnsgraph::config::Config;
use dnsgraph::http::HttpServer;
use dnsgraph::store::GraphClient;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("dnsgraph v{}", dnsgraph::version());

    let config = Config::from_env();
    let client = GraphClient::connect(&config.store).await?;

    let server = HttpServer::new(Arc::new(client), config.http_address.clone(), config.http_port);
    server.start().await?;

    Ok(())
}
