use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use store::Store;

use crate::{auth, expenses, summary, trackers};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/trackers", get(trackers::list).post(trackers::create))
        .route("/api/trackers/{id}", delete(trackers::remove))
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/{id}", delete(expenses::remove))
        .route("/api/summary", get(summary::get))
        .with_state(state)
}

pub async fn run(store: Arc<dyn Store>) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    store: Arc<dyn Store>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState { store })).await
}

pub fn spawn_with_listener(
    store: Arc<dyn Store>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
