//! Download descriptions, range planning, outcomes and hash verification.
//!
//! The download module is organized into four components:
//!
//! - [`download`] - The [`Download`] descriptor and URL handling
//! - [`range`] - Partitioning of a resource into byte ranges
//! - [`outcome`] - The [`Summary`] of a finished download
//! - [`hash`] - File integrity verification through digest checking
//!
//! # Examples
//!
//! ```rust
//! use splitfetch::download::{range, Download};
//! use std::convert::TryFrom;
//!
//! let download = Download::try_from("https://example.com/file.zip")?;
//! let plan = range::plan(1000, 4)?;
//! assert_eq!(plan.ranges()[3].start, 750);
//! println!("{} in {} ranges", download.filename(), plan.len());
//! # Ok::<(), splitfetch::Error>(())
//! ```

pub mod download;
pub mod hash;
pub mod outcome;
pub mod range;

pub use download::Download;
pub use hash::{
    calculate_file_digest, detect_hash_type, verify_checksum, ChecksumSpec, HashAlgorithm,
};
pub use outcome::{DownloadOutcome, Summary};
pub use range::{plan, ByteRange, RangePlan};
