//! Configuration structures and defaults for the downloader.
//!
//! [`DownloaderConfig`] is filled in by the
//! [`DownloaderBuilder`](super::DownloaderBuilder) and read by the
//! [`Downloader`](super::Downloader) for every download.

use crate::download::DownloadOutcome;
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&DownloadOutcome) + Send + Sync>;

/// Default number of ranges a resource is split into.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory relative destinations are resolved against.
    pub directory: PathBuf,
    /// Number of ranges fetched concurrently for one download.
    pub workers: usize,
    /// Number of retries for transient request failures.
    pub retries: u32,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Use a `bytes=0-0` range request to get the size instead of a HEAD request.
    pub use_range_for_content_length: bool,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("workers", &self.workers)
            .field("retries", &self.retries)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field(
                "use_range_for_content_length",
                &self.use_range_for_content_length,
            )
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            workers: DEFAULT_WORKERS,
            retries: 0,
            timeout: None,
            proxy: None,
            style_options: StyleOptions::default(),
            headers: None,
            use_range_for_content_length: false,
            on_complete: None,
        }
    }
}
