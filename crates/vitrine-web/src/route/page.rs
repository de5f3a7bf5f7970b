use crate::route::file::file_response;
use crate::route::{RouteError, RouteResult, SiteState};
use crate::template::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::path::Path;
use std::sync::Arc;

/// File in the static root backing the `/containers` page.
const CONTAINERS_PAGE: &str = "containers.html";

pub(crate) async fn handle_index(State(state): State<Arc<SiteState>>) -> RouteResult {
    let html = state
        .templates
        .render(&state.index_template, &Context::new())
        .await
        .map_err(|e| RouteError::InternalServerError(format!("Failed to render index: {}", e)))?;
    Ok(Html(html).into_response())
}

pub(crate) async fn handle_containers(State(state): State<Arc<SiteState>>) -> RouteResult {
    match file_response(Path::new(CONTAINERS_PAGE), &state.static_root).await {
        // A registered page whose backing file is gone is a server fault,
        // not a client-side 404.
        Err(RouteError::NotFound) => Err(RouteError::InternalServerError(format!(
            "Missing page file: {}",
            CONTAINERS_PAGE
        ))),
        response => response,
    }
}

/// Requests outside the GET surface answer like any unmatched path.
pub(crate) async fn handle_unmatched(State(state): State<Arc<SiteState>>) -> Response {
    not_found(&state).await
}

/// Not-found body for unmatched asset paths: the `404` template when the
/// site provides one, a plain text fallback otherwise.
pub(crate) async fn not_found(state: &SiteState) -> Response {
    match state
        .templates
        .render(&state.not_found_template, &Context::new())
        .await
    {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => RouteError::NotFound.into_response(),
    }
}
