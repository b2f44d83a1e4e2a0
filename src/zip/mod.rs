//! Store-only ZIP archive encoding and decoding.
//!
//! This module implements both directions of a deliberately small subset of
//! the ZIP format: every entry is stored uncompressed (method 0) with an
//! embedded CRC-32.
//!
//! ## Architecture
//!
//! The module is organized into three components:
//!
//! - [`structures`]: wire-level constants, DOS date/time packing, and the
//!   parsed entry type
//! - [`writer`]: serializes entries into local headers, a central directory,
//!   and the end-of-central-directory trailer
//! - [`reader`]: sequential local-header scanner and extractor
//!
//! ## Archive layout
//!
//! An archive written here is a strict concatenation:
//!
//! 1. `[local file header + filename + data]` for each entry, in order
//! 2. one central directory record per entry, contiguously
//! 3. exactly one end-of-central-directory trailer
//!
//! All multi-byte integers are little-endian. The reader walks the local
//! headers from offset zero and stops at the first central-directory or
//! trailer signature; it never parses the central directory itself. That
//! keeps it correct for archives this writer produces and for store-method
//! archives from other tools, but archives relying on data descriptors,
//! ZIP64, or disk spanning are out of contract.
//!
//! ## Limitations
//!
//! - No compression (DEFLATE entries are rejected, not inflated)
//! - No encryption support
//! - No multi-disk archive support
//! - Whole-file buffering; suited to modest backup payloads

mod reader;
mod structures;
mod writer;

pub use reader::ZipReader;
pub use structures::{CompressionMethod, ZipFileEntry};
pub use writer::{pack_directory, ArchiveEntry, ZipWriter};
