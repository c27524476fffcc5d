//! Single-range fetches.
//!
//! A [`RangeFetcher`] issues one `GET` with a `Range: bytes=start-end`
//! header and returns exactly the requested bytes, tagged with the range
//! index so they can be reassembled regardless of completion order. It never
//! retries; that policy belongs to the client the downloader builds.

use crate::download::ByteRange;
use crate::error::{Error, Result};
use crate::progress::RangeProgress;
use crate::utils::content_range_header;

use futures::StreamExt;
use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, instrument};

/// The payload fetched for one [`ByteRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResult {
    /// Index of the range inside its plan.
    pub index: usize,
    /// Raw body bytes.
    pub bytes: Vec<u8>,
}

/// Sort fetched ranges back into plan order.
///
/// Fetches complete in any order; the assembled file must follow the
/// range indexes.
pub fn order_results(mut results: Vec<RangeResult>) -> Vec<RangeResult> {
    results.sort_unstable_by_key(|result| result.index);
    results
}

/// Fetches byte ranges of one resource.
#[derive(Clone)]
pub struct RangeFetcher<'a> {
    client: &'a ClientWithMiddleware,
    url: &'a Url,
    total_size: u64,
}

impl<'a> RangeFetcher<'a> {
    /// Creates a fetcher for a resource of `total_size` bytes.
    pub fn new(client: &'a ClientWithMiddleware, url: &'a Url, total_size: u64) -> Self {
        Self {
            client,
            url,
            total_size,
        }
    }

    fn spans_resource(&self, range: &ByteRange) -> bool {
        range.start == 0 && range.end + 1 == self.total_size
    }

    /// Fetch the inclusive interval `[range.start, range.end]`.
    ///
    /// # Errors
    ///
    /// - [`Error::RangeNotSupported`] if the server answers with a
    ///   non-partial success for a range that is not the whole resource.
    /// - [`Error::Transfer`] on connection errors, timeouts, non-success
    ///   statuses, a mismatching `Content-Range` or a body of the wrong
    ///   length.
    #[instrument(skip(self, progress), fields(url = %self.url, range = %range))]
    pub async fn fetch(&self, range: &ByteRange, progress: &RangeProgress) -> Result<RangeResult> {
        let res = self
            .client
            .get(self.url.clone())
            .header(RANGE, range.header_value())
            .send()
            .await
            .map_err(|e| Error::Transfer(format!("request for {} failed: {}", range, e)))?;

        let status = res.status();
        if status == StatusCode::PARTIAL_CONTENT {
            if let Some(content_range) = content_range_header(res.headers()) {
                if content_range.start != range.start || content_range.end != range.end {
                    return Err(Error::Transfer(format!(
                        "asked for {} but the server sent bytes {}-{}",
                        range, content_range.start, content_range.end
                    )));
                }
            }
        } else if status.is_success() {
            if !self.spans_resource(range) {
                return Err(Error::RangeNotSupported {
                    url: self.url.to_string(),
                    status: status.as_u16(),
                });
            }
            debug!("Server ignored the range, accepting the full body");
        } else {
            return Err(Error::Transfer(format!("{} failed with status {}", range, status)));
        }

        let expected = range.len();
        let mut bytes = Vec::with_capacity(expected as usize);
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk =
                item.map_err(|e| Error::Transfer(format!("reading {} failed: {}", range, e)))?;
            if bytes.len() as u64 + chunk.len() as u64 > expected {
                return Err(Error::Transfer(format!(
                    "server sent more than the {} bytes of {}",
                    expected, range
                )));
            }
            progress.inc(chunk.len() as u64);
            bytes.extend_from_slice(&chunk);
        }

        if bytes.len() as u64 != expected {
            return Err(Error::Transfer(format!(
                "received {} of the {} bytes of {}",
                bytes.len(),
                expected,
                range
            )));
        }

        debug!("Downloaded bytes {}-{}", range.start, range.end);
        Ok(RangeResult {
            index: range.index,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::range::plan;
    use rand::seq::SliceRandom;

    #[test]
    fn test_order_results_restores_plan_order() {
        let content: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
        let plan = plan(content.len() as u64, 7).unwrap();

        let mut results: Vec<RangeResult> = plan
            .iter()
            .map(|r| RangeResult {
                index: r.index,
                bytes: content[r.start as usize..=r.end as usize].to_vec(),
            })
            .collect();

        for _ in 0..10 {
            results.shuffle(&mut rand::rng());
            let assembled: Vec<u8> = order_results(results.clone())
                .into_iter()
                .flat_map(|r| r.bytes)
                .collect();
            assert_eq!(assembled, content);
        }
    }

    #[test]
    fn test_spans_resource() {
        let client = crate::http::create_http_client(Default::default()).unwrap();
        let url = Url::parse("http://localhost/file.bin").unwrap();
        let fetcher = RangeFetcher::new(&client, &url, 10);

        let whole = plan(10, 1).unwrap();
        assert!(fetcher.spans_resource(&whole.ranges()[0]));

        let halves = plan(10, 2).unwrap();
        assert!(!fetcher.spans_resource(&halves.ranges()[0]));
        assert!(!fetcher.spans_resource(&halves.ranges()[1]));
    }
}
