pub mod api;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();
    let state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api::build_api_routes(state))
        .layer(timeout_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Requests still running after `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    async fn fast() -> &'static str {
        "done"
    }

    fn router() -> Router {
        Router::new()
            .route("/slow", get(slow))
            .route("/fast", get(fast))
            .layer(timeout_layer(Duration::from_millis(50)))
    }

    async fn status_of(uri: &str) -> StatusCode {
        router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        assert_eq!(status_of("/slow").await, StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_passes_through() {
        assert_eq!(status_of("/fast").await, StatusCode::OK);
    }
}
