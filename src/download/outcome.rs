//! Terminal results of an orchestrated download.
//!
//! A download either yields a [`Summary`] describing the file now owned by
//! the caller, or one of the typed [`Error`](crate::Error) reasons.

use super::download::Download;
use crate::error::Error;

use std::path::{Path, PathBuf};

/// The result of [`Downloader::download`](crate::Downloader::download).
pub type DownloadOutcome = std::result::Result<Summary, Error>;

/// Represents a successfully assembled [`Download`].
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    download: Download,
    /// Final location of the assembled file.
    path: PathBuf,
    /// File size in bytes.
    size: u64,
    /// Number of ranges fetched.
    ranges: usize,
    /// Whether a digest was checked.
    verified: bool,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(
        download: Download,
        path: PathBuf,
        size: u64,
        ranges: usize,
        verified: bool,
    ) -> Self {
        Self {
            download,
            path,
            size,
            ranges,
            verified,
        }
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Path of the assembled file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of ranges the file was fetched in.
    pub fn ranges(&self) -> usize {
        self.ranges
    }

    /// `true` if the file was checked against an expected digest.
    pub fn verified(&self) -> bool {
        self.verified
    }

    /// Hand the verified file over to the caller.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
