//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /                     — hello payload
//!   GET    /health               — liveness probe (pings the database)
//!   POST   /api/v1/cats          — create a cat
//!   GET    /api/v1/cats          — list cats (optional limit/offset)
//!   GET    /api/v1/cats/{id}     — fetch one cat
//!   PUT    /api/v1/cats/{id}     — total overwrite of one cat
//!   DELETE /api/v1/cats/{id}     — remove one cat
//!
//! The handlers own request/response mapping only; persistence goes through
//! the generic CRUD service with the pool handed in per call.

pub mod error;
pub mod handlers;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use db::DbPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Instrument};
use uuid::Uuid;

pub use error::ApiError;

/// Shared state handed to every handler.  Cheap to clone: the pool is an
/// `Arc` internally.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Build the application router with all routes and layers attached.
pub fn router(pool: DbPool) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route(
            "/api/v1/cats",
            get(handlers::cats::list).post(handlers::cats::create),
        )
        .route(
            "/api/v1/cats/:id",
            get(handlers::cats::get)
                .put(handlers::cats::update)
                .delete(handlers::cats::delete),
        )
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { pool })
}

/// Bind `bind` and serve until ctrl-c.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(pool))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Tag every response with a fresh `x-request-id` so log lines and client
/// reports can be correlated.
async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4();
    let span = tracing::info_span!("request", %id);
    let mut res = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        res.headers_mut().insert("x-request-id", value);
    }
    res
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Failed to install ctrl-c handler: {err}"),
    }
}
