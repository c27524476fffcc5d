//! Download one file in parallel ranges and optionally verify it.
//!
//! ```text
//! cargo run --example fetch -- URL DEST [WORKERS] [DIGEST]
//! ```
//!
//! The digest algorithm is inferred from its length (64 hex characters for
//! SHA-256, 32 for MD5). Set `RUST_LOG=debug` to see every range.

use color_eyre::{eyre::eyre, Result};
use splitfetch::{ChecksumSpec, Download, DownloaderBuilder};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: fetch URL DEST [WORKERS] [DIGEST]";
    let url = args.next().ok_or_else(|| eyre!(usage))?;
    let dest = PathBuf::from(args.next().ok_or_else(|| eyre!(usage))?);
    let workers = match args.next() {
        Some(w) => w.parse::<usize>()?,
        None => splitfetch::downloader::DEFAULT_WORKERS,
    };

    let mut download = Download::try_from(url.as_str())?;
    download.destination = dest;
    if let Some(digest) = args.next() {
        download = download.with_checksum(ChecksumSpec::detect(&digest)?);
    }

    let downloader = DownloaderBuilder::new().workers(workers).build();
    let summary = downloader.download(&download).await?;

    println!(
        "\n{} bytes in {} ranges -> {:?}{}",
        summary.size(),
        summary.ranges(),
        summary.path(),
        if summary.verified() { " (verified)" } else { "" }
    );

    Ok(())
}
