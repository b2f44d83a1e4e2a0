//! Archive reader.
//!
//! Walks local file headers sequentially from offset zero and stops at the
//! first central-directory or end-of-central-directory signature. The
//! central directory itself is never parsed; the sequence of local headers
//! is trusted exclusively.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::crc32::crc32;
use crate::error::{Result, ZipError};

use super::structures::{
    CompressionMethod, ZipFileEntry, CDFH_SIGNATURE, EOCD_SIGNATURE, LFH_SIGNATURE, LFH_SIZE,
};

/// Store-only ZIP reader.
pub struct ZipReader {
    verify_crc: bool,
}

impl ZipReader {
    pub fn new() -> Self {
        Self { verify_crc: false }
    }

    /// Enable CRC-32 verification of each entry's content against its header
    /// before it is written out. Off by default.
    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_crc = verify;
        self
    }

    /// Parse entry metadata without writing anything to disk.
    pub fn entries(&self, archive: &[u8]) -> Result<Vec<ZipFileEntry>> {
        parse(archive)
    }

    /// Extract all entries beneath `destination`, returning the paths written
    /// in archive order.
    ///
    /// Entry names are normalized before use: backslashes become `/`, and
    /// empty and `..` segments are dropped silently, so no entry can escape
    /// the destination root. Intermediate directories are created as needed.
    pub async fn extract(&self, archive: &[u8], destination: &Path) -> Result<Vec<PathBuf>> {
        let entries = parse(archive)?;
        fs::create_dir_all(destination).await?;

        let mut written = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(target) = sanitize_path(destination, &entry.file_name) else {
                warn!(name = %entry.file_name, "skipping entry with no usable path segments");
                continue;
            };

            if entry.is_directory() {
                fs::create_dir_all(&target).await?;
                continue;
            }

            let data = &archive[entry.data.clone()];
            if self.verify_crc {
                let actual = crc32(data);
                if actual != entry.crc32 {
                    return Err(ZipError::ChecksumMismatch {
                        path: entry.file_name.clone(),
                        expected: entry.crc32,
                        actual,
                    });
                }
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&target, data).await?;
            debug!(name = %entry.file_name, bytes = data.len(), "extracted");
            written.push(target);
        }
        Ok(written)
    }
}

impl Default for ZipReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential local-header scan.
fn parse(archive: &[u8]) -> Result<Vec<ZipFileEntry>> {
    let mut entries = Vec::new();
    let mut cursor = Cursor::new(archive);

    loop {
        let offset = cursor.position();
        if archive.len() as u64 - offset < 4 {
            // Ran out of bytes without seeing a terminator signature.
            return Err(ZipError::InvalidArchive);
        }
        let signature = cursor.read_u32::<LittleEndian>()?;
        match signature {
            LFH_SIGNATURE => {
                let entry = parse_local_entry(&mut cursor, archive, offset)?;
                if entry.compression_method != CompressionMethod::Stored {
                    return Err(ZipError::UnsupportedCompressionMethod(
                        entry.compression_method.as_u16(),
                    ));
                }
                entries.push(entry);
            }
            CDFH_SIGNATURE | EOCD_SIGNATURE => break,
            _ => return Err(ZipError::InvalidArchive),
        }
    }

    Ok(entries)
}

/// Parse one local file header whose signature has already been consumed.
/// Leaves the cursor positioned after the entry's content.
fn parse_local_entry(
    cursor: &mut Cursor<&[u8]>,
    archive: &[u8],
    lfh_offset: u64,
) -> Result<ZipFileEntry> {
    // Fixed 26-byte remainder of the header.
    if (archive.len() as u64 - cursor.position()) < (LFH_SIZE - 4) as u64 {
        return Err(ZipError::InvalidArchive);
    }
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let method = cursor.read_u16::<LittleEndian>()?;
    let last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc = cursor.read_u32::<LittleEndian>()?;
    let compressed_size = cursor.read_u32::<LittleEndian>()?;
    let uncompressed_size = cursor.read_u32::<LittleEndian>()?;
    let name_len = cursor.read_u16::<LittleEndian>()? as u64;
    let extra_len = cursor.read_u16::<LittleEndian>()? as u64;

    let name_start = cursor.position();
    let data_start = name_start + name_len + extra_len;
    let data_end = data_start + compressed_size as u64;
    if data_end > archive.len() as u64 {
        return Err(ZipError::InvalidArchive);
    }

    let name_bytes = &archive[name_start as usize..(name_start + name_len) as usize];
    // Lossy conversion keeps extraction going for non-UTF8 names.
    let file_name = String::from_utf8_lossy(name_bytes).to_string();
    cursor.set_position(data_end);

    Ok(ZipFileEntry {
        file_name,
        compression_method: CompressionMethod::from_u16(method),
        compressed_size,
        uncompressed_size,
        crc32: crc,
        lfh_offset,
        last_mod_time,
        last_mod_date,
        data: data_start as usize..data_end as usize,
    })
}

/// Join an archive entry name onto `destination`, dropping empty and `..`
/// segments. Returns `None` when nothing usable remains.
fn sanitize_path(destination: &Path, name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut target = destination.to_path_buf();
    let mut any = false;
    for segment in normalized.split('/') {
        if segment.is_empty() || segment == ".." {
            continue;
        }
        target.push(segment);
        any = true;
    }
    any.then_some(target)
}
