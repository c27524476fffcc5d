//! Core downloader implementation.
//!
//! [`Downloader::download`] probes the resource size, plans the byte ranges,
//! fetches every range concurrently, writes them in index order into a
//! staging file next to the destination, verifies the optional digest and
//! finally renames the staging file into place. Any failure leaves no
//! partial file behind.
//!
//! ```rust,no_run
//! use splitfetch::downloader::DownloaderBuilder;
//! use splitfetch::download::{ChecksumSpec, Download};
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().workers(8).build();
//! let download = Download::try_from("https://example.com/setup.exe")?.with_checksum(
//!     ChecksumSpec::detect("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")?,
//! );
//!
//! let summary = downloader.download(&download).await?;
//! println!("{:?} ({} bytes)", summary.path(), summary.size());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::fetcher::{order_results, RangeFetcher, RangeResult};
use crate::download::{
    plan, verify_checksum, ByteRange, ChecksumSpec, Download, DownloadOutcome, Summary,
};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::ProgressDisplay;
use crate::utils::content_length::{content_length_header, get_content_length};

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, RANGE};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error, info, instrument, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use splitfetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory relative destinations are resolved against.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of ranges per download.
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Gets the number of retries for transient request failures.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the per-request timeout.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.config.timeout
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether to use range requests for content length.
    pub fn use_range_for_content_length(&self) -> bool {
        self.config.use_range_for_content_length
    }

    /// Where the assembled file of `download` ends up.
    pub fn destination(&self, download: &Download) -> PathBuf {
        self.config.directory.join(&download.destination)
    }

    /// Download, assemble and optionally verify one resource.
    ///
    /// The `on_complete` callback, if any, is invoked with the outcome
    /// before it is returned.
    pub async fn download(&self, download: &Download) -> DownloadOutcome {
        let outcome = self.download_inner(download).await;

        match &outcome {
            Ok(summary) => info!("Downloaded {:?} successfully", summary.path()),
            Err(e) => error!("Failed to download {}: {}", download.filename(), e),
        }

        if let Some(ref callback) = self.config.on_complete {
            callback(&outcome);
        }

        outcome
    }

    #[instrument(skip(self, download), fields(url = %download.url))]
    async fn download_inner(&self, download: &Download) -> DownloadOutcome {
        let output = self.destination(download);
        let staging = staging_path(&output)?;

        let client = create_http_client(HttpClientConfig {
            retries: self.config.retries,
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
            timeout: self.config.timeout,
        })?;

        let total_size = self.probe_size(&client, download).await?;
        let plan = plan(total_size, self.config.workers)?;
        info!(
            "Starting download of {} ({} bytes) using {} ranges",
            download.filename(),
            total_size,
            plan.len()
        );

        // Fetch every range at once; the first failure drops the others.
        let progress_display = ProgressDisplay::new(self.config.style_options.clone(), total_size);
        progress_display.set_message(download.filename());
        let fetcher = RangeFetcher::new(&client, &download.url, total_size);
        let fetched = stream::iter(plan.iter())
            .map(|range| self.fetch_range(&fetcher, range, &progress_display))
            .buffer_unordered(plan.len())
            .try_collect::<Vec<_>>()
            .await;

        let results = match fetched {
            Ok(results) => {
                progress_display.finish();
                results
            }
            Err(e) => {
                progress_display.abandon("download failed");
                return Err(e);
            }
        };

        if let Some(parent) = output.parent() {
            debug!("Creating destination directory {:?}", parent);
            fs::create_dir_all(parent).await?;
        }

        debug!("Writing {} ranges to {:?}", results.len(), staging);
        if let Err(e) = write_assembled(&staging, order_results(results)).await {
            discard(&staging).await;
            return Err(e);
        }

        let verified = match &download.checksum {
            Some(spec) => {
                if !verify_staging(&staging, checksum_task(&staging, spec)).await? {
                    warn!("Checksum verification failed, removing {:?}", output);
                    discard(&staging).await;
                    discard(&output).await;
                    return Err(Error::Integrity {
                        algorithm: spec.algorithm(),
                        expected: spec.expected().to_string(),
                    });
                }
                info!("File checksum verified successfully");
                true
            }
            None => false,
        };

        if let Err(e) = fs::rename(&staging, &output).await {
            discard(&staging).await;
            return Err(e.into());
        }

        Ok(Summary::new(
            download.clone(),
            output,
            total_size,
            plan.len(),
            verified,
        ))
    }

    /// Discover the size of the resource without transferring its body.
    async fn probe_size(&self, client: &ClientWithMiddleware, download: &Download) -> Result<u64> {
        let size = if self.config.use_range_for_content_length {
            let res = client
                .get(download.url.clone())
                .header(RANGE, "bytes=0-0")
                .send()
                .await
                .map_err(|e| Error::Transfer(format!("size probe failed: {}", e)))?;
            if !res.status().is_success() {
                return Err(Error::Transfer(format!(
                    "size probe failed with status {}",
                    res.status()
                )));
            }
            get_content_length(&res)
        } else {
            let res = client
                .head(download.url.clone())
                .send()
                .await
                .map_err(|e| Error::Transfer(format!("HEAD request failed: {}", e)))?;
            if !res.status().is_success() {
                return Err(Error::Transfer(format!(
                    "HEAD request failed with status {}",
                    res.status()
                )));
            }
            content_length_header(res.headers())
        };

        match size {
            Some(size) if size > 0 => Ok(size),
            _ => {
                error!("Cannot determine the size of the file to download");
                Err(Error::SizeUnknown {
                    url: download.url.to_string(),
                })
            }
        }
    }

    async fn fetch_range(
        &self,
        fetcher: &RangeFetcher<'_>,
        range: &ByteRange,
        progress_display: &ProgressDisplay,
    ) -> Result<RangeResult> {
        let progress = progress_display.create_range_progress(range);
        let result = fetcher.fetch(range, &progress).await;
        progress_display.finish_range(&progress);
        result
    }
}

/// Sibling path the ranges are assembled into before the final rename.
fn staging_path(output: &Path) -> Result<PathBuf> {
    let name = output.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} does not name a file", output),
        )
    })?;
    Ok(output.with_file_name(format!(".{}.part", name.to_string_lossy())))
}

async fn write_assembled(path: &Path, parts: Vec<RangeResult>) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    for part in parts {
        file.write_all(&part.bytes).await?;
    }
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

fn checksum_task(path: &Path, spec: &ChecksumSpec) -> impl FnOnce() -> bool + Send + 'static {
    let path = path.to_path_buf();
    let expected = spec.expected().to_string();
    let algorithm = spec.algorithm();
    move || verify_checksum(&path, &expected, algorithm)
}

/// Run `check` on the blocking pool. The staging file is discarded if the
/// check cannot complete.
async fn verify_staging<F>(staging: &Path, check: F) -> Result<bool>
where
    F: FnOnce() -> bool + Send + 'static,
{
    match tokio::task::spawn_blocking(check).await {
        Ok(matches) => Ok(matches),
        Err(e) => {
            discard(staging).await;
            Err(Error::Internal(format!("checksum task failed: {}", e)))
        }
    }
}

/// Remove a file, ignoring a missing one.
async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed {:?}", path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {:?}: {}", path, e),
    }
}
