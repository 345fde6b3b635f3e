use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

/// Serve the homepage at `/` and every other file below `static_dir` by path.
pub fn router(static_dir: &Path) -> Router<()> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join(INDEX_FILE)))
        .fallback_service(ServeDir::new(static_dir))
}
