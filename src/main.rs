use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warp::Filter;

use patientdb::api::rest::{self, RestApi};
use patientdb::config::load_config;
use patientdb::service::PatientService;
use patientdb::storage::FileStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patientdb=info")),
        )
        .init();

    let config = load_config(Path::new("config.yaml")).map_err(|e| Box::<dyn Error>::from(e))?;

    info!(path = %config.storage.path, "starting PatientDB");

    // Open the store, seeding an empty collection on first run.
    let store = FileStore::new(&config.storage.path).map_err(|e| Box::<dyn Error>::from(e))?;

    let service = Arc::new(PatientService::new(Arc::new(store)));
    let api = RestApi::new(service);

    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;
    info!(%addr, "starting server");

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    // Set up server with graceful shutdown
    let routes = api.routes().recover(rest::handle_rejection);

    let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async move {
        shutdown_rx.await.ok();
        info!("shutting down server");
    });

    // Create task for running the server
    let server_handle = tokio::spawn(server);

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    info!("ctrl-c received, starting graceful shutdown");

    // Start shutdown process
    shutdown_tx.send(()).ok();

    // Wait for server to exit
    server_handle.await.map_err(|e| Box::<dyn Error>::from(e))?;

    info!("server shutdown complete");
    Ok(())
}
