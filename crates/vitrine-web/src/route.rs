mod file;
mod page;

use crate::template::TemplateStore;
use axum::Router;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Read-only state shared by every request handler.
pub(crate) struct SiteState {
    pub static_root: PathBuf,
    pub templates: TemplateStore,
    pub index_template: String,
    pub not_found_template: String,
}

enum RouteError {
    NotFound,
    Forbidden,
    InternalServerError(String),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            RouteError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            RouteError::InternalServerError(msg) => {
                // The detail stays in the log; clients only see the status.
                error!("request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

type RouteResult<T = Response> = Result<T, RouteError>;

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

/// Builds the fixed route table: explicit pages first, then the static
/// asset fallback. Routes are registered once and never change.
///
/// The surface is GET-only; any other method gets the same not-found
/// response as an unmatched path.
pub(crate) fn build_route(state: Arc<SiteState>) -> Router {
    Router::new()
        .route("/", get(page::handle_index))
        .route("/containers", get(page::handle_containers))
        .route("/{*path}", get(file::handle_asset))
        .method_not_allowed_fallback(page::handle_unmatched)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
