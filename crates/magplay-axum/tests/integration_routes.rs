//! Integration tests for the playback router.
//!
//! A recording dispatcher stands in for the launch chain, so no process
//! is ever started.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use magplay_axum::{AxumContext, create_router};
use magplay_core::{CoreError, PlaybackDispatcher, PlaybackRequest, ServiceConfig};
use magplay_runtime::LaunchEventBroadcaster;

const LINK: &str = "magnet:?xt=urn:btih:0123456789abcdef&dn=Some%20Show";

#[derive(Default)]
struct RecordingDispatcher {
    links: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingDispatcher {
    fn links(&self) -> Vec<String> {
        self.links.lock().unwrap().clone()
    }
}

impl PlaybackDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: PlaybackRequest) -> Result<u64, CoreError> {
        if let Some(msg) = &self.fail_with {
            return Err(CoreError::Internal(msg.clone()));
        }
        let mut links = self.links.lock().unwrap();
        links.push(request.link().to_string());
        Ok(links.len() as u64)
    }
}

fn app(dispatcher: Arc<RecordingDispatcher>) -> Router {
    create_router(AxumContext::new(
        dispatcher,
        Arc::new(LaunchEventBroadcaster::new()),
        ServiceConfig::with_defaults(),
    ))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

fn encoded(link: &str) -> String {
    link.replace('&', "%26")
}

#[tokio::test]
async fn valid_link_is_dispatched_and_answered_with_launched() {
    let dispatcher = Arc::new(RecordingDispatcher::default());

    let (status, headers, body) = send(
        app(dispatcher.clone()),
        Method::GET,
        &format!("/play?link={}", encoded(LINK)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "launched");
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        dispatcher.links(),
        vec!["magnet:?xt=urn:btih:0123456789abcdef&dn=Some Show".to_string()]
    );
}

#[tokio::test]
async fn legacy_magnet_parameter_is_accepted() {
    let dispatcher = Arc::new(RecordingDispatcher::default());

    let (status, _, body) = send(app(dispatcher.clone()), Method::POST, "/play?magnet=magnet:?xt=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "launched");
    assert_eq!(dispatcher.links(), vec!["magnet:?xt=1".to_string()]);
}

#[tokio::test]
async fn missing_link_is_rejected_without_dispatch() {
    let dispatcher = Arc::new(RecordingDispatcher::default());

    for uri in ["/play", "/play?link=", "/play?other=1"] {
        let (status, _, body) = send(app(dispatcher.clone()), Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Missing link parameter", "{uri}");
    }
    assert!(dispatcher.links().is_empty());
}

#[tokio::test]
async fn link_without_scheme_prefix_is_rejected_without_dispatch() {
    let dispatcher = Arc::new(RecordingDispatcher::default());

    for uri in ["/play?link=http://example.com/x.torrent", "/play?link=magnet:xt=1"] {
        let (status, _, body) = send(app(dispatcher.clone()), Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Invalid link", "{uri}");
    }
    assert!(dispatcher.links().is_empty());
}

#[tokio::test]
async fn dispatch_failure_is_a_server_error() {
    let dispatcher = Arc::new(RecordingDispatcher {
        fail_with: Some("no async runtime".into()),
        ..RecordingDispatcher::default()
    });

    let (status, _, body) = send(app(dispatcher), Method::GET, "/play?link=magnet:?xt=1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("error: "), "{body}");
    assert!(body.contains("no async runtime"), "{body}");
}

#[tokio::test]
async fn ping_answers_ok() {
    let (status, _, body) = send(app(Arc::default()), Method::GET, "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, headers, body) = send(app(Arc::default()), Method::GET, "/stop").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "not found");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_short_circuits_on_any_path() {
    let dispatcher = Arc::new(RecordingDispatcher::default());

    for uri in ["/play?link=magnet:?xt=1", "/ping", "/anything"] {
        let (status, headers, body) = send(app(dispatcher.clone()), Method::OPTIONS, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_empty(), "{uri}");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }
    assert!(dispatcher.links().is_empty());
}

#[tokio::test]
async fn cross_origin_headers_on_error_responses() {
    let (status, headers, _) = send(app(Arc::default()), Method::GET, "/play").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
