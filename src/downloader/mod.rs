//! Downloader module containing the range orchestration, the builder, the
//! configuration and the single-range fetcher.
//!
//! - `downloader` - Core [`Downloader`] struct with the orchestration logic
//! - `builder` - [`DownloaderBuilder`] for configuration using the builder pattern
//! - `config` - Configuration structures and callback types
//! - `fetcher` - [`RangeFetcher`] issuing one ranged request
//!
//! # Examples
//!
//! ```rust,no_run
//! use splitfetch::downloader::DownloaderBuilder;
//! use splitfetch::download::Download;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::hidden().workers(4).build();
//! let download = Download::try_from("https://example.com/file.zip")?;
//! match downloader.download(&download).await {
//!     Ok(summary) => println!("saved to {:?}", summary.path()),
//!     Err(e) => eprintln!("download failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod fetcher;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig, DEFAULT_WORKERS};
pub use downloader::Downloader;
pub use fetcher::{order_results, RangeFetcher, RangeResult};
