//! Description of a single ranged download.
//!
//! A [`Download`] names the remote resource, where the assembled file should
//! land, and optionally the digest it must match.
//!
//! ```rust
//! use splitfetch::download::{ChecksumSpec, Download, HashAlgorithm};
//! use std::convert::TryFrom;
//!
//! let download = Download::try_from("https://example.com/dist/setup-4.8.exe")?
//!     .with_checksum(ChecksumSpec::new(
//!         HashAlgorithm::Md5,
//!         "d41d8cd98f00b204e9800998ecf8427e",
//!     )?);
//! assert_eq!(download.destination.to_str(), Some("setup-4.8.exe"));
//! # Ok::<(), splitfetch::Error>(())
//! ```

use super::hash::ChecksumSpec;
use crate::error::Error;

use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
#[derive(Debug, Clone)]
pub struct Download {
    /// URL of the resource.
    pub url: Url,
    /// Where to write the assembled file.
    ///
    /// Relative paths are resolved against the downloader directory.
    pub destination: PathBuf,
    /// Expected digest of the assembled file.
    pub checksum: Option<ChecksumSpec>,
}

impl Download {
    /// Creates a new [`Download`].
    pub fn new(url: &Url, destination: impl AsRef<Path>) -> Self {
        Self {
            url: url.clone(),
            destination: destination.as_ref().to_path_buf(),
            checksum: None,
        }
    }

    /// Attach the digest the assembled file must match.
    pub fn with_checksum(mut self, checksum: ChecksumSpec) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Name of the destination file, as shown in logs and on the progress bar.
    pub fn filename(&self) -> String {
        self.destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        let segment = value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })?;

        let filename = decode_filename(segment).ok_or_else(|| {
            Error::InvalidUrl(format!("The url \"{}\" has an unusable filename", value))
        })?;
        Ok(Download::new(value, filename))
    }
}

/// Percent-decode a path segment into a bare file name.
///
/// Returns `None` for names that are not UTF-8, that would leave the
/// destination directory (`.`, `..`, embedded separators) or that are empty.
fn decode_filename(segment: &str) -> Option<String> {
    let filename = percent_decode_str(segment).decode_utf8().ok()?;
    let unusable = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(&['/', '\\', '\0'][..]);
    if unusable {
        return None;
    }
    Some(filename.into_owned())
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Download::try_from(&u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::hash::HashAlgorithm;

    #[test]
    fn test_try_from_url() {
        let u = Url::parse("http://domain.com/file.zip").unwrap();
        let d = Download::try_from(&u).unwrap();
        assert_eq!(d.destination, PathBuf::from("file.zip"));
        assert_eq!(d.filename(), "file.zip");
        assert!(d.checksum.is_none());
    }

    #[test]
    fn test_try_from_decodes_filename() {
        let d = Download::try_from("https://example.com/dl/my%20setup.exe").unwrap();
        assert_eq!(d.filename(), "my setup.exe");
    }

    #[test]
    fn test_try_from_keeps_reserved_query_characters() {
        let d = Download::try_from("https://example.com/dl/c++.zip").unwrap();
        assert_eq!(d.filename(), "c++.zip");

        let d = Download::try_from("https://example.com/dl/a&b=c.zip").unwrap();
        assert_eq!(d.filename(), "a&b=c.zip");

        let d = Download::try_from("https://example.com/dl/100%25.txt").unwrap();
        assert_eq!(d.filename(), "100%.txt");
    }

    #[test]
    fn test_try_from_rejects_escaping_filenames() {
        for url in [
            "https://example.com/dl/..%2F..%2Fx",
            "https://example.com/dl/..%5Cx",
            "https://example.com/dl/%2E%2E",
            "https://example.com/dl/%2E",
            "https://example.com/dl/%FF.bin",
        ] {
            assert!(
                matches!(Download::try_from(url), Err(Error::InvalidUrl(_))),
                "{} was accepted",
                url
            );
        }
    }

    #[test]
    fn test_decode_filename() {
        assert_eq!(decode_filename("setup.exe").as_deref(), Some("setup.exe"));
        assert_eq!(decode_filename("a%20b").as_deref(), Some("a b"));
        assert_eq!(decode_filename("..."), Some("...".to_string()));
        assert_eq!(decode_filename("%00"), None);
        assert_eq!(decode_filename("a%2Fb"), None);
    }

    #[test]
    fn test_try_from_rejects_missing_filename() {
        assert!(matches!(
            Download::try_from("https://example.com/"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Download::try_from("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_with_checksum() {
        let u = Url::parse("http://domain.com/file.zip").unwrap();
        let spec =
            ChecksumSpec::new(HashAlgorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e").unwrap();
        let d = Download::new(&u, "/tmp/out.zip").with_checksum(spec.clone());
        assert_eq!(d.destination, PathBuf::from("/tmp/out.zip"));
        assert_eq!(d.checksum, Some(spec));
    }
}
