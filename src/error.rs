//! Error handling for splitfetch.
//!
//! Every failure of a ranged download surfaces as a distinct variant so the
//! caller can decide whether to retry, lower the worker count, or give up.
//! Checksum verification itself never produces an error: a digest mismatch
//! only becomes [`Error::Integrity`] once the orchestrator has rolled back
//! the destination file.

use crate::download::hash::HashAlgorithm;

use std::io;
use thiserror::Error;

/// Errors that can happen when using splitfetch.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte-range plan cannot be built.
    ///
    /// Returned when the total size or the worker count is zero. Not
    /// retryable.
    #[error("Invalid range plan: {0}")]
    InvalidPlan(String),

    /// The server did not report a usable size for the resource.
    ///
    /// No range request is issued when this happens.
    #[error("Unknown size for {url}")]
    SizeUnknown { url: String },

    /// A network or HTTP failure while probing or fetching a range.
    ///
    /// A single failing range aborts the whole download.
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// The server ignored the `Range` header and answered with the whole
    /// resource.
    #[error("Range requests not supported by {url} (status {status})")]
    RangeNotSupported { url: String, status: u16 },

    /// The assembled file does not match the expected digest.
    ///
    /// The destination file has already been removed when this is returned.
    #[error("Integrity error: {algorithm} digest does not match {expected}")]
    Integrity {
        algorithm: HashAlgorithm,
        expected: String,
    },

    /// The hash algorithm name is not one of the supported algorithms.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The expected digest is not valid hex of the right length.
    #[error("Invalid checksum: {0}")]
    InvalidChecksum(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Raised while creating, writing or renaming the assembled file.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, typically while building the client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that can fail with a splitfetch error.
pub type Result<T> = std::result::Result<T, Error>;
