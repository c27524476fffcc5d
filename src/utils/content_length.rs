//! Content length and content range extraction.
//!
//! Sizes are read from the raw headers rather than from
//! [`reqwest::Response::content_length`], which reports the body length and
//! is therefore zero for `HEAD` responses.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};
use reqwest::{Response, StatusCode};

/// A parsed `Content-Range: bytes start-end/total` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// First byte offset.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
    /// Complete size, `None` when the server sent `*`.
    pub total: Option<u64>,
}

/// Parse Content-Range header to extract total size.
///
/// ```rust
/// use splitfetch::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    content_range
        .split('/')
        .nth(1)
        .and_then(|size| size.trim().parse::<u64>().ok())
}

/// Parse a complete Content-Range header value.
///
/// ```rust
/// use splitfetch::utils::content_length::{parse_content_range, ContentRange};
///
/// assert_eq!(
///     parse_content_range("bytes 250-499/1000"),
///     Some(ContentRange { start: 250, end: 499, total: Some(1000) })
/// );
/// ```
pub fn parse_content_range(content_range: &str) -> Option<ContentRange> {
    let spec = content_range.trim().strip_prefix("bytes")?.trim_start();
    let (interval, total) = spec.split_once('/')?;
    let (start, end) = interval.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = end.trim().parse::<u64>().ok()?;
    if end < start {
        return None;
    }
    let total = match total.trim() {
        "*" => None,
        size => Some(size.parse::<u64>().ok()?),
    };
    Some(ContentRange { start, end, total })
}

/// Read the `Content-Length` header.
///
/// Returns `None` if the header is missing or its value is not an u64.
pub fn content_length_header(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

/// Read the `Content-Range` header.
pub fn content_range_header(headers: &HeaderMap) -> Option<ContentRange> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range)
}

/// Total size of the resource behind a response.
///
/// A `206 Partial Content` response only reports the total through its
/// `Content-Range` header; any other response reports it as `Content-Length`.
pub fn get_content_length(response: &Response) -> Option<u64> {
    let headers = response.headers();
    if response.status() == StatusCode::PARTIAL_CONTENT {
        headers
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
    } else {
        content_length_header(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
        assert_eq!(parse_content_range_total("bytes 200-1023/5000"), Some(5000));
        assert_eq!(parse_content_range_total("bytes 0-0/1"), Some(1));
        assert_eq!(parse_content_range_total("bytes 0-1023/ 2048 "), Some(2048));
        assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
        assert_eq!(parse_content_range_total("invalid"), None);
        assert_eq!(parse_content_range_total("bytes 0-1023"), None);
        assert_eq!(parse_content_range_total(""), None);
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(
            parse_content_range("bytes 0-0/1"),
            Some(ContentRange {
                start: 0,
                end: 0,
                total: Some(1)
            })
        );
        assert_eq!(
            parse_content_range("bytes 4-6/*"),
            Some(ContentRange {
                start: 4,
                end: 6,
                total: None
            })
        );
        assert_eq!(parse_content_range("bytes 6-4/7"), None);
        assert_eq!(parse_content_range("bytes */7"), None);
        assert_eq!(parse_content_range("items 0-4/7"), None);
        assert_eq!(parse_content_range("bytes 0-4"), None);
    }

    #[test]
    fn test_content_length_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length_header(&headers), None);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1000"));
        assert_eq!(content_length_header(&headers), Some(1000));

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert_eq!(content_length_header(&headers), None);
    }

    #[test]
    fn test_content_range_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_range_header(&headers), None);

        headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 2-3/7"));
        assert_eq!(
            content_range_header(&headers),
            Some(ContentRange {
                start: 2,
                end: 3,
                total: Some(7)
            })
        );
    }
}
