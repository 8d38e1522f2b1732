//! HTTP front for the todo store.
//!
//! # Overview
//! Four routes over a single `TodoStore`: list, create, update and delete.
//! Every request is independent; the only shared state is the store handle
//! injected through axum's `State`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use std::future::Future;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use todo_core::TodoStore;

pub use config::Config;
pub use error::ApiError;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

pub fn app(store: TodoStore, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todos/{id}",
            put(routes::update_todo).delete(routes::delete_todo),
        )
        .layer(cors_layer(allowed_origin.clone()))
        .layer(from_fn_with_state(allowed_origin, middleware::origin_guard))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(store)
}

/// Browsers may call the API only from `allowed_origin`. The allow-origin
/// header is only sent back when the request's `Origin` matches.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE)
}

/// Serve `app` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
