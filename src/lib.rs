//! Splitfetch downloads a single HTTP(S) resource as several byte ranges in
//! parallel, reassembles them in order and optionally checks the result
//! against an expected digest.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use splitfetch::{download::Download, downloader::DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let download = Download::try_from("https://example.com/dist/installer.exe")?;
//! let downloader = DownloaderBuilder::new()
//!     .directory("output".into())
//!     .workers(4)
//!     .build();
//! let summary = downloader.download(&download).await?;
//! println!("{:?}", summary.path());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - The `Download` descriptor, range planning and hash verification
//! - [`downloader`] - The `Downloader`, its builder and the range fetcher
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Header parsing helpers
//!
//! Logging goes through [`tracing`]; install a subscriber to see it.

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::hash::{detect_hash_type, verify_checksum, ChecksumSpec, HashAlgorithm};
pub use download::range::{plan, ByteRange, RangePlan};
pub use download::{Download, DownloadOutcome, Summary};
pub use downloader::{Downloader, DownloaderBuilder, RangeFetcher, RangeResult};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
