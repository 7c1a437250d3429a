// HTTP routing: /stats report or a static file

mod files;
mod stats;

pub use files::mime_type;

use axum::{Router, extract::State, http::Uri, response::Response};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::sampler::StatsSampler;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) sampler: Arc<StatsSampler>,
    pub(crate) document_root: Arc<PathBuf>,
}

/// Where a request path is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Stats,
    /// Path contains "..": refused before the file system is touched.
    Forbidden,
    /// File relative to the document root.
    File(String),
}

pub fn classify_path(path: &str) -> Route {
    if path == "/stats" {
        return Route::Stats;
    }
    if path.contains("..") {
        return Route::Forbidden;
    }
    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
        Route::File("index.html".to_string())
    } else {
        Route::File(relative.to_string())
    }
}

pub fn app(sampler: Arc<StatsSampler>, document_root: PathBuf) -> Router {
    let state = AppState {
        sampler,
        document_root: Arc::new(document_root),
    };
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(State(state): State<AppState>, uri: Uri) -> Response {
    match classify_path(uri.path()) {
        Route::Stats => stats::stats_response(&state.sampler).await,
        Route::Forbidden => {
            tracing::info!(path = uri.path(), "rejected path traversal attempt");
            files::forbidden()
        }
        Route::File(relative) => files::serve_file(&state.document_root, &relative).await,
    }
}
