//! Shared helpers for the integration tests.
//!
//! [`FakeOrigin`] is an in-process HTTP origin plugged into the client as a
//! `reqwest_middleware` layer. It serves byte ranges, injects faults per
//! range start and records every request it sees.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use rand::Rng;
use rangedl::download::{DownloadItem, DownloadObserver};
use rangedl::downloader::DownloaderBuilder;
use rangedl::progress::{ProgressBarOpts, StyleOptions};
use rangedl::{parse_range_header, Error, HttpClientConfig};
use reqwest::header::{HeaderMap, HeaderValue, RANGE, USER_AGENT};
use reqwest::{Method, Request, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use reqwest_tracing::TracingMiddleware;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Common test constants
pub const ORIGIN: &str = "http://origin.test";
pub const TEST_USER_AGENT: &str = "rangedl-test-agent";
pub const FRAGMENT_SIZE: usize = 16 * 1024;

/// Install a subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Random bytes of the given length.
pub fn random_body(len: usize) -> Vec<u8> {
    let mut body = vec![0u8; len];
    rand::rng().fill(&mut body[..]);
    body
}

/// Fast retries so failure paths run quickly.
pub fn test_builder(origin: &FakeOrigin) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .client(origin.client())
        .retry_base_delay(Duration::from_millis(1))
}

// === Fake origin ===

/// What the origin does with one request.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Reply with this status and an empty body.
    Status(u16),
    /// Send this many good bytes, then fail the body.
    BreakAfter(usize),
    /// Send this many `0xFF` bytes, then fail the body.
    Corrupt(usize),
    /// Send the first fragment, then never finish.
    Stall,
    /// Ignore the range and send the whole resource with `200 OK`.
    FullBody,
    /// Answer with a `Content-Range` total one byte larger than the resource.
    WrongTotal,
    /// Answer with a `Content-Range` that starts one byte after the request.
    ShiftedRange,
}

/// A resource served by [`FakeOrigin`].
#[derive(Debug, Clone)]
pub struct Resource {
    body: Bytes,
    ranges: bool,
    head_status: u16,
    advertise_length: bool,
    length_backup: Option<u64>,
    faults: HashMap<u64, VecDeque<Fault>>,
}

impl Resource {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body: Bytes::from(body),
            ranges: true,
            head_status: 200,
            advertise_length: true,
            length_backup: None,
            faults: HashMap::new(),
        }
    }

    /// Do not advertise `Accept-Ranges: bytes`.
    pub fn without_ranges(mut self) -> Self {
        self.ranges = false;
        self
    }

    /// Answer HEAD with this status.
    pub fn head_status(mut self, status: u16) -> Self {
        self.head_status = status;
        self
    }

    /// Leave `Content-Length` out of the HEAD response.
    pub fn hide_length(mut self) -> Self {
        self.advertise_length = false;
        self
    }

    /// Advertise this length in `X-Length-Backup`.
    pub fn length_backup(mut self, length: u64) -> Self {
        self.length_backup = Some(length);
        self
    }
}

/// A request seen by the origin.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub range: Option<String>,
}

type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send + Sync>>;

#[derive(Default)]
struct OriginState {
    resources: Mutex<HashMap<String, Resource>>,
    requests: Mutex<Vec<RecordedRequest>>,
    latency: Mutex<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// In-process origin answering through the client middleware stack.
#[derive(Clone, Default)]
pub struct FakeOrigin {
    state: Arc<OriginState>,
}

impl FakeOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose requests all land on this origin.
    pub fn client(&self) -> ClientWithMiddleware {
        ClientBuilder::new(reqwest::Client::new())
            .with(TracingMiddleware::default())
            .with(self.clone())
            .build()
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.state.latency.lock().unwrap() = latency;
    }

    /// Serve `body` at `path` with range support and return its URL.
    pub fn serve(&self, path: &str, body: Vec<u8>) -> String {
        self.serve_resource(path, Resource::new(body))
    }

    pub fn serve_resource(&self, path: &str, resource: Resource) -> String {
        self.state
            .resources
            .lock()
            .unwrap()
            .insert(path.to_string(), resource);
        format!("{}{}", ORIGIN, path)
    }

    /// Queue a fault for the next GET of `path` starting at byte `start`.
    pub fn fail(&self, path: &str, start: u64, fault: Fault) {
        let mut resources = self.state.resources.lock().unwrap();
        let resource = resources.get_mut(path).expect("resource must be served first");
        resource.faults.entry(start).or_default().push_back(fault);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// `Range` headers of the GETs of `path`, in arrival order.
    pub fn ranges_requested(&self, path: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::GET && r.path == path)
            .filter_map(|r| r.range)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Highest number of requests being answered at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.state.peak.load(Ordering::SeqCst)
    }

    async fn respond(&self, req: Request) -> Response {
        let path = req.url().path().to_string();
        let range = req
            .headers()
            .get(RANGE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.state.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().clone(),
            path: path.clone(),
            range: range.clone(),
        });

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak.fetch_max(now, Ordering::SeqCst);
        let latency = *self.state.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        let (resource, fault) = {
            let mut resources = self.state.resources.lock().unwrap();
            let Some(resource) = resources.get_mut(&path) else {
                return reply(StatusCode::NOT_FOUND, vec![], empty());
            };
            let fault = if req.method() == Method::GET {
                let total = resource.body.len() as u64;
                let start = range
                    .as_deref()
                    .and_then(|r| parse_range_header(r, total).ok())
                    .map_or(0, |r| r.start);
                resource.faults.get_mut(&start).and_then(VecDeque::pop_front)
            } else {
                None
            };
            (resource.clone(), fault)
        };

        if req.method() == Method::HEAD {
            return head(&resource);
        }
        get(&resource, range.as_deref(), fault)
    }
}

#[async_trait::async_trait]
impl Middleware for FakeOrigin {
    async fn handle(
        &self,
        req: Request,
        _extensions: &mut http::Extensions,
        _next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        Ok(self.respond(req).await)
    }
}

fn head(resource: &Resource) -> Response {
    let status = StatusCode::from_u16(resource.head_status).unwrap();
    if !status.is_success() {
        return reply(status, vec![], empty());
    }
    let mut headers = vec![];
    if resource.advertise_length {
        headers.push(("content-length", resource.body.len().to_string()));
    }
    if resource.ranges {
        headers.push(("accept-ranges", "bytes".to_string()));
    }
    if let Some(backup) = resource.length_backup {
        headers.push(("x-length-backup", backup.to_string()));
    }
    reply(status, headers, empty())
}

fn get(resource: &Resource, range: Option<&str>, fault: Option<Fault>) -> Response {
    let total = resource.body.len() as u64;
    let requested = match range {
        Some(value) if resource.ranges => parse_range_header(value, total).ok(),
        _ => None,
    };

    let (status, mut headers, slice) = match (requested, &fault) {
        (Some(r), None)
        | (Some(r), Some(Fault::BreakAfter(_)))
        | (Some(r), Some(Fault::Corrupt(_)))
        | (Some(r), Some(Fault::Stall))
        | (Some(r), Some(Fault::WrongTotal))
        | (Some(r), Some(Fault::ShiftedRange)) => {
            let end = r.end.min(total.saturating_sub(1));
            let reported = match fault {
                Some(Fault::WrongTotal) => total + 1,
                _ => total,
            };
            let first = match fault {
                Some(Fault::ShiftedRange) => r.start + 1,
                _ => r.start,
            };
            (
                StatusCode::PARTIAL_CONTENT,
                vec![("content-range", format!("bytes {}-{}/{}", first, end, reported))],
                resource.body.slice(r.start as usize..=end as usize),
            )
        }
        _ => (StatusCode::OK, vec![], resource.body.clone()),
    };

    let body: BodyStream = match fault {
        Some(Fault::Status(code)) => {
            return reply(StatusCode::from_u16(code).unwrap(), vec![], empty());
        }
        Some(Fault::BreakAfter(n)) => {
            let good = slice.slice(..n.min(slice.len()));
            Box::pin(fragments(good).chain(broken()))
        }
        Some(Fault::Corrupt(n)) => {
            let junk = Bytes::from(vec![0xFF; n.min(slice.len())]);
            Box::pin(fragments(junk).chain(broken()))
        }
        Some(Fault::Stall) => {
            let first = slice.slice(..FRAGMENT_SIZE.min(slice.len()));
            Box::pin(stream::iter(vec![Ok(first)]).chain(stream::pending()))
        }
        _ => Box::pin(fragments(slice.clone())),
    };

    if status == StatusCode::OK {
        headers.push(("content-length", slice.len().to_string()));
    }
    reply(status, headers, body)
}

fn fragments(data: Bytes) -> impl Stream<Item = Result<Bytes, io::Error>> + Send + Sync {
    let pieces: Vec<Result<Bytes, io::Error>> = (0..data.len())
        .step_by(FRAGMENT_SIZE)
        .map(|at| Ok(data.slice(at..(at + FRAGMENT_SIZE).min(data.len()))))
        .collect();
    stream::iter(pieces)
}

fn broken() -> impl Stream<Item = Result<Bytes, io::Error>> + Send + Sync {
    stream::iter(vec![Err(io::Error::new(
        io::ErrorKind::ConnectionReset,
        "connection reset by origin",
    ))])
}

fn empty() -> BodyStream {
    Box::pin(stream::empty())
}

fn reply(status: StatusCode, headers: Vec<(&'static str, String)>, body: BodyStream) -> Response {
    let mut builder = http::Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    Response::from(builder.body(reqwest::Body::wrap_stream(body)).unwrap())
}

// === Observers ===

/// Records every event of one item.
#[derive(Default)]
pub struct Recorder {
    progress: Mutex<Vec<(u64, u64)>>,
    success: Mutex<Option<Vec<u8>>>,
    failures: Mutex<Vec<String>>,
    cancelled: AtomicUsize,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn progress(&self) -> Vec<(u64, u64)> {
        self.progress.lock().unwrap().clone()
    }

    pub fn last_progress(&self) -> Option<(u64, u64)> {
        self.progress.lock().unwrap().last().copied()
    }

    pub fn data(&self) -> Option<Vec<u8>> {
        self.success.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    pub fn cancellations(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl DownloadObserver for Recorder {
    fn on_progress(&self, loaded: u64, total: u64) {
        self.progress.lock().unwrap().push((loaded, total));
    }

    fn on_success(&self, data: Vec<u8>) {
        *self.success.lock().unwrap() = Some(data);
    }

    fn on_failed(&self, error: &Error) {
        if error.is_cancelled() {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
        self.failures.lock().unwrap().push(error.to_string());
    }
}

/// An item for `url` reporting to `recorder`.
pub fn recorded_item(url: &str, recorder: &Arc<Recorder>) -> DownloadItem {
    DownloadItem::try_from(url)
        .expect("valid test URL")
        .with_shared_observer(recorder.clone())
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        proxy: None,
        headers: Some(create_test_headers()),
    }
}

// === Progress Bar Helpers ===

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
}
