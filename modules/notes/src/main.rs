//! Notes Service — personal notes over HTTP.
//!
//! Keeps notes in a process-local, lock-guarded repository and exposes
//! create/read/update/delete/search endpoints under `/api/notes`.
//! Nothing is persisted; restarting the process starts from an empty store.
//!
//! Default: http://127.0.0.1:3001/

mod clock;
mod config;
mod error;
mod repository;
mod routes;

use config::ServiceConfig;
use repository::NotesRepository;
use routes::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServiceConfig::from_env();
    let state = Arc::new(AppState::new(NotesRepository::new(), config.max_title_len));
    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    log::info!("Notes Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
    log::info!("Notes Service stopped");
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::warn!("Could not listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
