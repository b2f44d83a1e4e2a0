//! # stozip
//!
//! A minimal store-only ZIP codec for packing and unpacking backup archives.
//!
//! This library packs a directory tree (or an explicit entry list) into a
//! single ZIP container with an embedded CRC-32 per entry, and unpacks such
//! a container back into a directory tree. Every entry uses the store method
//! (no compression), so archives it writes open in any standard ZIP tool,
//! and store-method archives written by other tools read back correctly.
//!
//! ## Features
//!
//! - Write local file headers, a central directory, and the EOCD trailer
//! - Atomic archive output (temporary file renamed into place on success)
//! - Sequential local-header extraction with path-traversal protection
//! - Optional CRC-32 verification on extraction
//! - Directory packing with deterministic traversal order
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use stozip::{ArchiveEntry, ZipReader, ZipWriter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Build an archive from in-memory entries
//!     let mut writer = ZipWriter::new();
//!     writer.push(ArchiveEntry::from_bytes("notes/a.txt", b"hello".to_vec()));
//!     let archive = writer.finish()?;
//!
//!     // Extract it somewhere else
//!     let written = ZipReader::new()
//!         .extract(&archive, Path::new("restore"))
//!         .await?;
//!     for path in &written {
//!         println!("{}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod crc32;
pub mod error;
pub mod io;
pub mod zip;

pub use cli::{Cli, Command};
pub use crc32::crc32;
pub use error::{Result, ZipError};
pub use io::{collect_entries, BytesSource, ContentSource, FileSource};
pub use zip::{pack_directory, ArchiveEntry, CompressionMethod, ZipFileEntry, ZipReader, ZipWriter};
