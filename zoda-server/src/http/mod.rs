// ========================================================
// File: zoda-server/src/http/mod.rs
// ========================================================

pub mod error;
pub mod handlers;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_server::{Handle, Server};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use zoda_common::Error;

use crate::context::ServerContext;

pub fn build_router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/api/generate-fortune", post(handlers::generate_fortune))
        .route("/api/generate-image", post(handlers::generate_image))
        .route("/api/upload-to-ipfs", post(handlers::upload_to_ipfs))
        .route("/api/upload-metadata", post(handlers::upload_metadata))
        .route(
            "/api/fetch-and-resize-image",
            post(handlers::fetch_and_resize_image),
        )
        .route("/health", get(handlers::health))
        .with_state(ctx)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Starts the API server and hands back the bound address, a shutdown
/// trigger, and the serve task.
pub async fn start_http_server(
    ctx: Arc<ServerContext>,
) -> Result<(SocketAddr, oneshot::Sender<()>, JoinHandle<()>), Error> {
    let addr = ctx.bind_addr;
    let app = build_router(ctx);

    let (shutdown_send, shutdown_recv) = oneshot::channel::<()>();
    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        let _ = shutdown_recv.await;
        handle_clone.graceful_shutdown(None);
    });

    let server = Server::bind(addr)
        .handle(handle.clone())
        .serve(app.into_make_service());

    let join = tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("HTTP server error: {}", e);
        }
        info!("HTTP server shut down.");
    });

    let bound = handle
        .listening()
        .await
        .ok_or_else(|| Error::Config(format!("failed to bind {}", addr)))?;
    info!("HTTP API listening on http://{}", bound);
    Ok((bound, shutdown_send, join))
}
