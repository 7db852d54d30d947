//! Source classification and content resolution.
//!
//! Turns one input line into an owned content stream: lines that parse as a
//! URL with a scheme are fetched over HTTP, everything else is opened as a
//! local file. The pipeline depends only on this seam and stays ignorant of
//! transport details.

mod stream;

pub use stream::ContentStream;

use anyhow::Context;
use std::time::Duration;
use url::Url;

/// Default HTTP connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request HTTP timeout in seconds (includes the body read).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// How a source identifier is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Parses as a URL with a non-empty scheme; fetched over HTTP.
    Remote,
    /// Everything else; opened as a local file path.
    Local,
}

impl SourceKind {
    /// Classifies one input line. Unparseable or schemeless lines are never
    /// an error; they fall through to local-path treatment.
    pub fn classify(source: &str) -> SourceKind {
        match Url::parse(source) {
            Ok(url) if !url.scheme().is_empty() => SourceKind::Remote,
            _ => SourceKind::Local,
        }
    }
}

/// Error opening a source. Local and remote failures stay distinguishable so
/// the dispatch loop can log the cause before dropping the source.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("open {path}: {source}")]
    Local {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("fetch {url}: {source}")]
    Remote {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Opens content streams for source identifiers.
///
/// Owns the shared HTTP client. Timeouts apply per request, connect and whole
/// transfer, so a dead host cannot stall a worker forever.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    client: reqwest::Client,
}

impl SourceResolver {
    /// Builds a resolver with the given timeouts in seconds (None = built-in
    /// defaults, 10 connect / 15 whole request).
    pub fn new(
        connect_timeout_secs: Option<u64>,
        request_timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(
                connect_timeout_secs.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
            .timeout(Duration::from_secs(
                request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ))
            .build()
            .context("build HTTP client")?;
        Ok(Self { client })
    }

    /// Resolves one source into an owned content stream.
    ///
    /// A remote source is resolved once the response headers arrive; the body
    /// is streamed later by whoever owns the stream. Any HTTP status counts
    /// as resolved, only transport-level failures are errors.
    pub async fn open(&self, source: &str) -> Result<ContentStream, ResolveError> {
        match SourceKind::classify(source) {
            SourceKind::Remote => {
                let response =
                    self.client
                        .get(source)
                        .send()
                        .await
                        .map_err(|e| ResolveError::Remote {
                            url: source.to_string(),
                            source: e,
                        })?;
                Ok(ContentStream::remote(response))
            }
            SourceKind::Local => {
                let file =
                    tokio::fs::File::open(source)
                        .await
                        .map_err(|e| ResolveError::Local {
                            path: source.to_string(),
                            source: e,
                        })?;
                Ok(ContentStream::local(file))
            }
        }
    }
}
