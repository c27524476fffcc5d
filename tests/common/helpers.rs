use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use sha2::{Digest, Sha256};
use splitfetch::{ChecksumSpec, Download, DownloaderBuilder, HashAlgorithm};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_USER_AGENT: &str = "splitfetch-test-agent";
pub const TEST_SHA256_HASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Installs a test subscriber so `RUST_LOG=debug` shows library logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// SHA-256 of some bytes, as lowercase hex
pub fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// MD5 of some bytes, as lowercase hex
pub fn md5_hex(content: &[u8]) -> String {
    hex::encode(md5::Md5::digest(content))
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a quiet downloader writing into `dir`
pub fn create_test_downloader_builder(dir: &Path, workers: usize) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .workers(workers)
}

/// Creates a download for `url`, optionally checked against a SHA-256 digest
pub fn create_test_download(url: &str, sha256: Option<&str>) -> Download {
    let download = Download::try_from(url).expect("Failed to create download");
    match sha256 {
        Some(digest) => download.with_checksum(
            ChecksumSpec::new(HashAlgorithm::Sha256, digest).expect("Invalid digest"),
        ),
        None => download,
    }
}

/// Path of the staging file used while assembling `path`
pub fn staging_file(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap().to_string_lossy();
    path.with_file_name(format!(".{}.part", name))
}

/// Asserts that neither the file nor its staging file exists
pub fn assert_no_output(path: &Path) {
    assert!(!path.exists(), "File should not exist at path: {:?}", path);
    assert!(
        !staging_file(path).exists(),
        "Staging file should not exist for: {:?}",
        path
    );
}
