//! Owned content streams handed from the dispatch loop to workers.

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size for local files.
const FILE_CHUNK_BYTES: usize = 8 * 1024;

/// A sequentially readable byte stream for one resolved source.
///
/// Dropping the stream releases the underlying resource (file handle or HTTP
/// connection), so release happens on every exit path.
#[derive(Debug)]
pub struct ContentStream {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Local(File),
    Remote(reqwest::Response),
}

impl ContentStream {
    pub(crate) fn local(file: File) -> Self {
        Self {
            inner: Inner::Local(file),
        }
    }

    pub(crate) fn remote(response: reqwest::Response) -> Self {
        Self {
            inner: Inner::Remote(response),
        }
    }

    /// Reads the next chunk, or `None` at end of stream. Chunk sizes are
    /// whatever the transport yields; callers must not rely on them.
    pub async fn next_chunk(&mut self) -> anyhow::Result<Option<Bytes>> {
        match &mut self.inner {
            Inner::Local(file) => {
                let mut buf = vec![0u8; FILE_CHUNK_BYTES];
                let n = file.read(&mut buf).await?;
                if n == 0 {
                    return Ok(None);
                }
                buf.truncate(n);
                Ok(Some(Bytes::from(buf)))
            }
            Inner::Remote(response) => Ok(response.chunk().await?),
        }
    }
}
