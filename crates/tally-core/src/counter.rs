//! Streaming substring counter.
//!
//! Counts marker occurrences chunk by chunk, carrying the last
//! `needle.len() - 1` bytes between chunks so matches that straddle a chunk
//! boundary are still seen. The resulting count does not depend on how the
//! stream was chunked.

use crate::source::ContentStream;

/// Incremental occurrence counter over a byte stream.
///
/// Occurrences are counted at every matching byte offset, overlapping ones
/// included, which keeps the total invariant under re-chunking.
#[derive(Debug, Clone)]
pub struct OccurrenceCounter {
    needle: Vec<u8>,
    carry: Vec<u8>,
    count: u64,
}

impl OccurrenceCounter {
    /// An empty needle matches nothing; the count stays 0.
    pub fn new(needle: &[u8]) -> Self {
        Self {
            needle: needle.to_vec(),
            carry: Vec::new(),
            count: 0,
        }
    }

    /// Feeds one chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) {
        let n = self.needle.len();
        if n == 0 || chunk.is_empty() {
            return;
        }

        // Scan carry + chunk. The carry is shorter than the needle, so no
        // match can sit entirely inside it and get counted twice.
        let mut window = std::mem::take(&mut self.carry);
        window.extend_from_slice(chunk);
        if window.len() >= n {
            let needle = self.needle.as_slice();
            let found = window.windows(n).filter(|w| *w == needle).count();
            self.count += found as u64;
        }

        let keep = window.len().min(n - 1);
        window.drain(..window.len() - keep);
        self.carry = window;
    }

    /// Total occurrences seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Drains `stream`, counting occurrences of `needle`.
///
/// A read failure mid-stream is treated as end of stream: the partial count
/// stands and the stream is released. A stream with no readable content
/// counts 0.
pub async fn count_stream(mut stream: ContentStream, needle: &[u8]) -> u64 {
    let mut counter = OccurrenceCounter::new(needle);
    loop {
        match stream.next_chunk().await {
            Ok(Some(chunk)) => counter.feed(&chunk),
            Ok(None) => break,
            Err(err) => {
                tracing::debug!("read error treated as end of stream: {:#}", err);
                break;
            }
        }
    }
    counter.count()
}
