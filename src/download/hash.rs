//! Checksum verification for assembled downloads.
//!
//! Files are streamed through the selected hash function in fixed-size
//! blocks, never loaded whole into memory, and the lowercase hex digest is
//! compared case-insensitively to the expected value.
//!
//! # Supported Hash Types
//!
//! - **SHA-256**: 64-character hexadecimal strings
//! - **MD5**: 32-character hexadecimal strings
//!
//! # Examples
//!
//! ```rust
//! use splitfetch::download::hash::{detect_hash_type, HashAlgorithm};
//!
//! let sha256 = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
//! assert_eq!(detect_hash_type(sha256), Some(HashAlgorithm::Sha256));
//! assert_eq!("MD5".parse::<HashAlgorithm>()?, HashAlgorithm::Md5);
//! assert!("crc32".parse::<HashAlgorithm>().is_err());
//! # Ok::<(), splitfetch::Error>(())
//! ```

use crate::error::{Error, Result};

use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, error};

/// Size of the blocks fed to the hasher (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// MD5
    Md5,
}

impl HashAlgorithm {
    /// Length of the hex digest produced by the algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Md5 => 32,
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Md5 => "md5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "md5" => Ok(HashAlgorithm::Md5),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// An algorithm plus the digest a download is expected to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumSpec {
    algorithm: HashAlgorithm,
    expected: String,
}

impl ChecksumSpec {
    /// Creates a new [`ChecksumSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChecksum`] if `expected` is not a hex string
    /// of the length the algorithm produces.
    pub fn new(algorithm: HashAlgorithm, expected: &str) -> Result<Self> {
        let expected = expected.trim();
        if expected.len() != algorithm.hex_len() || !is_hex(expected) {
            return Err(Error::InvalidChecksum(format!(
                "\"{}\" is not a valid {} digest",
                expected, algorithm
            )));
        }
        Ok(Self {
            algorithm,
            expected: expected.to_string(),
        })
    }

    /// Creates a [`ChecksumSpec`] whose algorithm is inferred from the digest.
    pub fn detect(expected: &str) -> Result<Self> {
        let algorithm = detect_hash_type(expected.trim()).ok_or_else(|| {
            Error::InvalidChecksum(format!("cannot infer the algorithm of \"{}\"", expected))
        })?;
        Self::new(algorithm, expected)
    }

    /// The selected algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The expected hex digest, as supplied.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Detect hash type based on the hash string format.
///
/// SHA-256 digests are 64 hex characters, MD5 digests are 32.
///
/// ```
/// use splitfetch::download::hash::{detect_hash_type, HashAlgorithm};
///
/// assert_eq!(detect_hash_type("400a0698b5b8a84fc57ad96e0c3b57c3"), Some(HashAlgorithm::Md5));
/// assert_eq!(detect_hash_type("invalid_hash"), None);
/// ```
pub fn detect_hash_type(hash: &str) -> Option<HashAlgorithm> {
    if !is_hex(hash) {
        return None;
    }
    match hash.len() {
        64 => Some(HashAlgorithm::Sha256),
        32 => Some(HashAlgorithm::Md5),
        _ => None,
    }
}

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Calculate the lowercase hex digest of a file.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn calculate_file_digest(path: &Path, algorithm: HashAlgorithm) -> io::Result<String> {
    let file = File::open(path)?;
    match algorithm {
        HashAlgorithm::Sha256 => digest_reader::<Sha256, _>(file),
        HashAlgorithm::Md5 => digest_reader::<Md5, _>(file),
    }
}

/// Verify a local file against an expected digest.
///
/// Returns `false` on a mismatch and also when the file cannot be read; the
/// read failure is logged rather than returned.
pub fn verify_checksum(file_path: &Path, expected: &str, algorithm: HashAlgorithm) -> bool {
    debug!("Verifying {} checksum for {:?}", algorithm, file_path);
    match calculate_file_digest(file_path, algorithm) {
        Ok(actual) => {
            debug!("Calculated checksum: {}", actual);
            actual.eq_ignore_ascii_case(expected.trim())
        }
        Err(e) => {
            error!("Failed to verify checksum for {:?}: {}", file_path, e);
            false
        }
    }
}
