//! Offline bundle handler: cache first, then the asset directory

use std::sync::Arc;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::state::AppState;

/// Fallback for every path that is not an API route
///
/// Only GET and HEAD requests are answered from the cache, and the lookup
/// key is the full path including any query string. Everything else goes
/// to the asset directory.
pub async fn asset_handler(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let cacheable = matches!(*request.method(), Method::GET | Method::HEAD);

    if cacheable {
        if let Some(asset) = state.assets.get(&target) {
            debug!("Serving {} from cache", target);
            return (
                [(header::CONTENT_TYPE, asset.content_type)],
                asset.body.clone(),
            )
                .into_response();
        }
    }

    debug!("Passing {} {} through to disk", request.method(), target);
    match ServeDir::new(state.assets.root()).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
