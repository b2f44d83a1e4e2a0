use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::error::Result;

/// Trait for supplying an entry's full content to the writer.
///
/// The writer buffers each entry in memory before emitting its header, so a
/// source hands over its complete byte content in one call.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Read the entire content into memory.
    async fn read_all(&self) -> Result<Vec<u8>>;
}

/// Content backed by a file on disk, read when the entry is built.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn read_all(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path).await?)
    }
}

/// Content already resident in memory.
pub struct BytesSource {
    data: Vec<u8>,
}

impl BytesSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ContentSource for BytesSource {
    async fn read_all(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}
