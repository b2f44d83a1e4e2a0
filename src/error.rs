//! Error types for archive reading and writing.

use thiserror::Error;

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ZipError>;

/// Archive error types.
#[derive(Error, Debug)]
pub enum ZipError {
    /// IO error reading a source or writing an output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally malformed stream: unexpected signature or truncated
    /// header/data
    #[error("invalid or truncated ZIP archive")]
    InvalidArchive,

    /// Entry uses a compression method other than store
    #[error("unsupported compression method: {0} (only STORED/uncompressed is supported)")]
    UnsupportedCompressionMethod(u16),

    /// Recomputed CRC-32 differs from the header's declared value
    #[error("checksum mismatch for `{path}`: header {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch {
        path: String,
        expected: u32,
        actual: u32,
    },

    /// Entry content or name does not fit the format's 16/32-bit fields
    #[error("entry `{path}` is too large for the ZIP32 format: {size} bytes")]
    EntryTooLarge { path: String, size: u64 },

    /// Archive as a whole exceeds the 32-bit format limits
    #[error("archive exceeds the ZIP32 format limits ({entries} entries, {bytes} bytes)")]
    ArchiveTooLarge { entries: usize, bytes: u64 },
}
