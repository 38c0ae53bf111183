//! HTTP surface of a liveness service.
//!
//! The route table has exactly one entry. Anything else falls through to
//! axum's defaults: 404 for unknown paths, 405 for other methods on
//! `/health`.
//!
//! Every response carries `x-request-id`, echoed from the request or freshly
//! generated as a UUID v4, and the trace span for the request records it.

pub mod health;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};

use crate::service::Service;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Bare route table: `GET /health` bound to the given service.
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .with_state(service)
}

/// Route table wrapped in the request-ID and tracing layers.
///
/// This is what the server actually serves.
pub fn app(service: Service) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO));

    router(service).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
            .layer(trace_layer)
            .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER)),
    )
}

/// Span for one request. Runs after the ID is assigned, so it is always set.
fn request_span(req: &Request<Body>) -> tracing::Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // oneshot

    use super::*;

    // -----------------------------------------------------------------------
    // Test helpers
    // -----------------------------------------------------------------------

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    // -----------------------------------------------------------------------
    // GET /health
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn pipeline_health_returns_200_with_body() {
        let (status, body) = body_text(router(Service::MarketPipeline), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Pipeline service healthy");
    }

    #[tokio::test]
    async fn strategy_health_returns_200_with_body() {
        let (status, body) = body_text(router(Service::StrategyEngine), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Strategy service healthy");
    }

    #[tokio::test]
    async fn health_is_plain_text() {
        let response = router(Service::MarketPipeline)
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"), "content-type: {content_type}");
    }

    #[tokio::test]
    async fn health_ignores_query_and_body() {
        let req = Request::builder()
            .uri("/health?verbose=1&probe=k8s")
            .body(Body::from("ignored payload"))
            .unwrap();
        let (status, body) = body_text(router(Service::StrategyEngine), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Strategy service healthy");
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let app = router(Service::MarketPipeline);
        let first = body_text(app.clone(), get_request("/health")).await;
        for _ in 0..10 {
            assert_eq!(body_text(app.clone(), get_request("/health")).await, first);
        }
    }

    #[tokio::test]
    async fn concurrent_requests_each_get_200_and_body() {
        let app = app(Service::StrategyEngine);
        let mut set = tokio::task::JoinSet::new();
        for _ in 0..64 {
            let app = app.clone();
            set.spawn(async move { body_text(app, get_request("/health")).await });
        }

        let mut completed = 0;
        while let Some(result) = set.join_next().await {
            let (status, body) = result.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "Strategy service healthy");
            completed += 1;
        }
        assert_eq!(completed, 64);
    }

    // -----------------------------------------------------------------------
    // Fallthrough
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_path_is_404_without_health_body() {
        let (status, body) = body_text(app(Service::MarketPipeline), get_request("/status")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_ne!(body, "Pipeline service healthy");
    }

    #[tokio::test]
    async fn nested_health_path_is_not_matched() {
        let (status, _) = body_text(router(Service::MarketPipeline), get_request("/health/deep")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_to_health_is_not_200() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = body_text(router(Service::MarketPipeline), req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_ne!(body, "Pipeline service healthy");
    }

    // -----------------------------------------------------------------------
    // Request IDs
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn caller_request_id_is_echoed() {
        let req = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "lb-42")
            .body(Body::empty())
            .unwrap();
        let response = app(Service::MarketPipeline).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "lb-42");
    }

    #[tokio::test]
    async fn missing_request_id_is_generated_as_uuid() {
        let response = app(Service::MarketPipeline)
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }

    #[tokio::test]
    async fn generated_ids_differ_per_request() {
        let app = app(Service::StrategyEngine);
        let first = app.clone().oneshot(get_request("/health")).await.unwrap();
        let second = app.oneshot(get_request("/health")).await.unwrap();
        assert_ne!(
            first.headers()[REQUEST_ID_HEADER],
            second.headers()[REQUEST_ID_HEADER]
        );
    }

    #[tokio::test]
    async fn request_id_does_not_change_health_body() {
        let req = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "trace-me")
            .body(Body::empty())
            .unwrap();
        let (status, body) = body_text(app(Service::StrategyEngine), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Strategy service healthy");
    }

    #[tokio::test]
    async fn request_id_is_set_on_404_too() {
        let response = app(Service::StrategyEngine)
            .oneshot(get_request("/missing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
