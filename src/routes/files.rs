// Static files from the document root

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::path::Path;

/// Content type by extension (text after the last '.'), `application/octet-stream` otherwise.
pub fn mime_type(path: &str) -> &'static str {
    let Some(dot) = path.rfind('.') else {
        return "application/octet-stream";
    };
    match &path[dot..] {
        ".html" => "text/html",
        ".css" => "text/css",
        ".js" => "application/javascript",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".ico" => "image/x-icon",
        ".json" => "application/json",
        ".txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

pub(super) fn forbidden() -> Response {
    plain(StatusCode::FORBIDDEN, "403 - Forbidden")
}

pub(super) fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, "404 - Not Found")
}

fn plain(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

/// Whole-file read; anything unreadable (missing, directory, permissions) is a 404.
pub(super) async fn serve_file(root: &Path, relative: &str) -> Response {
    let full_path = root.join(relative);
    match tokio::fs::read(&full_path).await {
        Ok(body) => ([(header::CONTENT_TYPE, mime_type(relative))], body).into_response(),
        Err(e) => {
            tracing::debug!(path = %full_path.display(), error = %e, "static file not served");
            not_found()
        }
    }
}
