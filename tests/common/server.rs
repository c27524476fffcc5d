//! A local HTTP server serving one known payload with range support.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Response, StatusCode},
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const PAYLOAD_PATH: &str = "/files/payload.bin";

/// Behavior knobs of the test server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Answer `Range` requests with `206 Partial Content`.
    pub honor_ranges: bool,
    /// Send `Content-Length` on HEAD responses.
    pub report_size: bool,
    /// Answer the range starting at this offset with a 500.
    pub fail_range_start: Option<u64>,
    /// Delay early ranges longer than late ones so they complete in reverse.
    pub stagger: bool,
    /// Report a `Content-Range` one byte shorter than the range served.
    pub misreport_range: bool,
    /// Drop the last byte of every partial body.
    pub truncate_body: bool,
    /// Append one extra byte to every partial body.
    pub pad_body: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            honor_ranges: true,
            report_size: true,
            fail_range_start: None,
            stagger: false,
            misreport_range: false,
            truncate_body: false,
            pad_body: false,
        }
    }
}

struct ServerState {
    content: Vec<u8>,
    options: ServerOptions,
    gets: AtomicUsize,
}

pub struct TestServer {
    url: String,
    state: Arc<ServerState>,
}

impl TestServer {
    /// URL of the payload.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of GET requests served so far.
    pub fn gets(&self) -> usize {
        self.state.gets.load(Ordering::SeqCst)
    }
}

pub async fn spawn_server(content: Vec<u8>, options: ServerOptions) -> TestServer {
    let state = Arc::new(ServerState {
        content,
        options,
        gets: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route(PAYLOAD_PATH, get(get_payload).head(head_payload))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    TestServer {
        url: format!("http://{}{}", addr, PAYLOAD_PATH),
        state,
    }
}

fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

async fn head_payload(State(state): State<Arc<ServerState>>) -> Response<Body> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCEPT_RANGES, "bytes");
    if state.options.report_size {
        builder = builder.header(header::CONTENT_LENGTH, state.content.len());
    }
    builder.body(Body::empty()).unwrap()
}

async fn get_payload(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response<Body> {
    state.gets.fetch_add(1, Ordering::SeqCst);
    let total = state.content.len() as u64;
    let range = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_range);

    match range {
        Some((start, end)) if state.options.honor_ranges => {
            if state.options.fail_range_start == Some(start) {
                return Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("boom"))
                    .unwrap();
            }
            if state.options.stagger {
                let delay = (total - start) * 200 / total;
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            let end = end.min(total - 1);
            let mut slice = state.content[start as usize..=end as usize].to_vec();
            if state.options.truncate_body {
                slice.pop();
            }
            if state.options.pad_body {
                slice.push(0);
            }
            let reported_end = if state.options.misreport_range {
                end.saturating_sub(1).max(start)
            } else {
                end
            };
            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, reported_end, total),
                )
                .body(Body::from(slice))
                .unwrap()
        }
        _ => Response::builder()
            .status(StatusCode::OK)
            .body(Body::from(state.content.clone()))
            .unwrap(),
    }
}
