use crate::route::{RouteError, RouteResult, SiteState, page};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header, response::Builder};
use mime_guess::from_path;
use std::path::{Component, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Rejects any request path that is not a plain sequence of normal
/// segments, so a join can never escape the static root.
fn sanitize(file_path: &str) -> Option<PathBuf> {
    let path = std::path::Path::new(file_path);
    if path
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(path.to_path_buf())
}

/// Streams a file from below `root` with its inferred content type.
pub(crate) async fn file_response(file_path: &std::path::Path, root: &std::path::Path) -> RouteResult {
    let path = root.join(file_path);

    // check whether path is a file
    if !path.exists() || !path.is_file() {
        return Err(RouteError::NotFound);
    }
    if path.strip_prefix(root).is_err() {
        return Err(RouteError::Forbidden);
    }

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| RouteError::InternalServerError(format!("Failed to get metadata: {}", e)))?;

    let file = File::open(&path)
        .await
        .map_err(|e| RouteError::InternalServerError(format!("Failed to open file: {}", e)))?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    let mime_type = from_path(&path).first_or_octet_stream();

    let response = Builder::new()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_str(mime_type.as_ref()).unwrap(),
        )
        .header(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()))
        .body(body)
        .unwrap();

    Ok(response)
}

pub(crate) async fn handle_asset(
    State(state): State<Arc<SiteState>>,
    Path(file_path): Path<String>,
) -> RouteResult {
    let Some(relative) = sanitize(&file_path) else {
        return Err(RouteError::Forbidden);
    };

    match file_response(&relative, &state.static_root).await {
        Err(RouteError::NotFound) => Ok(page::not_found(&state).await),
        response => response,
    }
}
