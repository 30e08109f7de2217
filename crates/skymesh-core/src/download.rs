//! Streaming download with per-chunk progress callbacks.

use std::path::Path;
use std::pin::Pin;

use futures_util::TryStreamExt;
use reqwest::Client;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

use crate::errors::{Result, SkymeshError};

/// Bytes moved per read.
pub const CHUNK_SIZE: usize = 1024;

/// Copies `reader` into `writer` in `CHUNK_SIZE` pieces, reporting the running
/// total after each write. A zero-length read ends the copy. The first read,
/// write or callback error aborts it; whatever was written stays written.
pub async fn copy_with_progress<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    mut on_progress: F,
) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
    F: FnMut(u64) -> std::io::Result<()>,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut transferred: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        transferred += n as u64;
        on_progress(transferred)?;
    }

    writer.flush().await?;
    Ok(transferred)
}

/// An HTTP body whose length is known up front.
pub struct Download {
    total_bytes: u64,
    body: Pin<Box<dyn AsyncRead + Send>>,
}

impl Download {
    pub fn new(total_bytes: u64, body: Pin<Box<dyn AsyncRead + Send>>) -> Self {
        Self { total_bytes, body }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Writes the body to `path`, creating or truncating it.
    pub async fn save_to<F>(mut self, path: &Path, on_progress: F) -> Result<u64>
    where
        F: FnMut(u64) -> std::io::Result<()>,
    {
        let mut file = tokio::fs::File::create(path).await?;
        let written = copy_with_progress(&mut self.body, &mut file, on_progress).await?;
        log::info!("saved {} of {} bytes to {}", written, self.total_bytes, path.display());
        Ok(written)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Starts a GET and hands back the body once headers arrive. The server
    /// must declare a positive content length.
    pub async fn fetch(&self, url: &str) -> Result<Download> {
        log::info!("downloading {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;

        let total_bytes = match response.content_length() {
            Some(len) if len > 0 => len,
            _ => return Err(SkymeshError::UnknownContentLength),
        };

        let stream = response.bytes_stream().map_err(body_error);
        let body = StreamReader::new(stream);
        Ok(Download::new(total_bytes, Box::pin(body)))
    }
}

/// Surfaces body stream errors through `AsyncRead`.
fn body_error(err: reqwest::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[cfg(test)]
#[path = "download_test.rs"]
mod tests;
