//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Main and per-range bar coordination
//!
//! ```rust
//! use splitfetch::downloader::DownloaderBuilder;
//! use splitfetch::progress::{ProgressBarOpts, StyleOptions};
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::new(
//!         ProgressBarOpts::default(),
//!         ProgressBarOpts::with_pip_style(),
//!     ))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::{ProgressDisplay, RangeProgress};
pub use style::{ProgressBarOpts, StyleOptions};
