//! AWS S3 backing store using ranged `GetObject` requests.
//!
//! This module provides [`S3Source`], a [`ByteSource`] that serves positional
//! reads as HTTP `Range` requests against a single S3 object, and reports size
//! via `HeadObject`. It mirrors the client-handling shape of a multipart S3
//! *writer* in this same family of crates, retargeted from upload to ranged
//! download: build a client, hold bucket/key, and drive calls to completion
//! through an owned runtime rather than exposing an async API, since the
//! archive core itself is synchronous.
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use zip_stream_core::S3Source;
//! use aws_sdk_s3::Client;
//!
//! let config = aws_config::load_from_env().await;
//! let client = Client::new(&config);
//!
//! let source = S3Source::new(client, "my-bucket", "archives/data.zip")?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::store::{expect_exact, ByteSource};
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// S3 object reached via `HeadObject`/`GetObject` ranged reads.
pub struct S3Source {
    client: Client,
    bucket: String,
    key: String,
    runtime: Runtime,
    len: OnceLock<u64>,
}

impl S3Source {
    /// Builds a source over `bucket`/`key` using an existing client.
    ///
    /// A dedicated current-thread runtime is created to drive the async AWS
    /// SDK calls from this adapter's synchronous `pread`/`size` methods.
    pub fn new(client: Client, bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let runtime = Runtime::new().map_err(|e| Error::adapter(e.to_string()))?;
        Ok(S3Source {
            client,
            bucket: bucket.into(),
            key: key.into(),
            runtime,
            len: OnceLock::new(),
        })
    }

    async fn head(&self) -> Result<u64> {
        let out = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| Error::adapter(format!("HeadObject {}/{}: {e}", self.bucket, self.key)))?;
        out.content_length()
            .map(|n| n as u64)
            .ok_or_else(|| Error::adapter("HeadObject response missing content-length"))
    }

    async fn get_range(&self, offset: u64, length: usize) -> Result<Bytes> {
        let end = offset + length as u64;
        let range = format!("bytes={offset}-{}", end.saturating_sub(1));
        let out = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .range(range)
            .send()
            .await
            .map_err(|e| Error::adapter(format!("GetObject {}/{}: {e}", self.bucket, self.key)))?;
        let data = out
            .body
            .collect()
            .await
            .map_err(|e| Error::adapter(format!("draining GetObject body: {e}")))?;
        Ok(data.into_bytes())
    }
}

impl ByteSource for S3Source {
    fn size(&self) -> Result<u64> {
        if let Some(len) = self.len.get() {
            return Ok(*len);
        }
        let len = self.runtime.block_on(self.head())?;
        Ok(*self.len.get_or_init(|| len))
    }

    fn pread(&self, offset: u64, length: usize) -> Result<Bytes> {
        let bytes = self.runtime.block_on(self.get_range(offset, length))?;
        expect_exact(bytes, length)
    }
}
