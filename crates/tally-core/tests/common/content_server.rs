//! Minimal HTTP/1.1 server for pipeline integration tests.
//!
//! Serves one static body for every request. Headers go out immediately so a
//! client sees the request resolve fast; an optional delay before the body
//! keeps the connection open, which lets tests observe how many fetches are
//! in flight at once via the gauge.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tracks in-flight and peak concurrent requests.
#[derive(Debug, Default)]
pub struct ConcurrencyGauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Highest number of requests that were open at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Server behavior knobs.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Status line sent with every response.
    pub status: &'static str,
    /// Pause between headers and body, keeping the connection open.
    pub delay: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            delay: Duration::ZERO,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base
/// URL (e.g. "http://127.0.0.1:12345/"). The server runs until the process
/// exits.
pub fn start(body: Vec<u8>) -> String {
    let (url, _gauge) = start_with_options(body, ServerOptions::default());
    url
}

/// Like `start`, but each request waits `delay` between headers and body, and
/// the returned gauge records peak request concurrency.
pub fn start_with_delay(body: Vec<u8>, delay: Duration) -> (String, Arc<ConcurrencyGauge>) {
    start_with_options(
        body,
        ServerOptions {
            delay,
            ..ServerOptions::default()
        },
    )
}

/// Full-control variant: custom status line and delay.
pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> (String, Arc<ConcurrencyGauge>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let gauge = Arc::new(ConcurrencyGauge::default());
    let server_gauge = Arc::clone(&gauge);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let gauge = Arc::clone(&server_gauge);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts, &gauge));
        }
    });
    (format!("http://127.0.0.1:{}/", port), gauge)
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: &ServerOptions,
    gauge: &ConcurrencyGauge,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    // One request per connection; anything beyond the request line is ignored.
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    gauge.enter();
    let headers = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(headers.as_bytes());
    let _ = stream.flush();
    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }
    let _ = stream.write_all(body);
    gauge.exit();
}
