//! Archive writer.
//!
//! Serializes an ordered entry list as `[local header + filename + data]` per
//! entry, followed by the central directory and the end-of-central-directory
//! trailer. Entries are emitted in insertion order; no path-uniqueness check
//! is performed, so duplicate paths produce duplicate entries.

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, Local};
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::crc32::crc32;
use crate::error::{Result, ZipError};
use crate::io::{collect_entries, ContentSource};

use super::structures::{
    dos_datetime, CDFH_SIGNATURE, EOCD_SIGNATURE, LFH_SIGNATURE, VERSION_NEEDED,
};

/// One file to be placed in the archive.
///
/// Content is buffered in memory and its CRC-32 is computed on construction,
/// before any header is emitted. `relative_path` uses `/` separators with no
/// leading slash.
pub struct ArchiveEntry {
    relative_path: String,
    data: Vec<u8>,
    crc32: u32,
    modified: Option<DateTime<Local>>,
}

impl ArchiveEntry {
    /// Create an entry from in-memory content.
    pub fn from_bytes(relative_path: impl Into<String>, data: Vec<u8>) -> Self {
        let checksum = crc32(&data);
        Self {
            relative_path: relative_path.into(),
            data,
            crc32: checksum,
            modified: None,
        }
    }

    /// Create an entry by reading a content source into memory.
    pub async fn from_source(
        relative_path: impl Into<String>,
        source: &dyn ContentSource,
    ) -> Result<Self> {
        let data = source.read_all().await?;
        Ok(Self::from_bytes(relative_path, data))
    }

    /// Set the modification timestamp stored in the entry's headers.
    /// When unset, the time of writing is used.
    pub fn with_modified(mut self, modified: DateTime<Local>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Store-only ZIP writer.
pub struct ZipWriter {
    entries: Vec<ArchiveEntry>,
}

impl ZipWriter {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Emission order is insertion order.
    pub fn push(&mut self, entry: ArchiveEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize all entries into a complete archive.
    pub fn finish(self) -> Result<Vec<u8>> {
        let now = Local::now();
        let entry_count =
            u16::try_from(self.entries.len()).map_err(|_| ZipError::ArchiveTooLarge {
                entries: self.entries.len(),
                bytes: 0,
            })?;

        let mut out: Vec<u8> = Vec::new();
        let mut central: Vec<u8> = Vec::new();

        for entry in &self.entries {
            let name = entry.relative_path.as_bytes();
            let name_len = u16::try_from(name.len()).map_err(|_| ZipError::EntryTooLarge {
                path: entry.relative_path.clone(),
                size: name.len() as u64,
            })?;
            // Store method: compressed size equals uncompressed size.
            let size = u32::try_from(entry.data.len()).map_err(|_| ZipError::EntryTooLarge {
                path: entry.relative_path.clone(),
                size: entry.data.len() as u64,
            })?;
            let (time, date) = dos_datetime(entry.modified.unwrap_or(now));
            let lfh_offset = checked_offset(out.len(), &self.entries)?;

            out.write_u32::<LittleEndian>(LFH_SIGNATURE)?;
            out.write_u16::<LittleEndian>(VERSION_NEEDED)?;
            out.write_u16::<LittleEndian>(0)?; // flags
            out.write_u16::<LittleEndian>(0)?; // method: store
            out.write_u16::<LittleEndian>(time)?;
            out.write_u16::<LittleEndian>(date)?;
            out.write_u32::<LittleEndian>(entry.crc32)?;
            out.write_u32::<LittleEndian>(size)?; // compressed size
            out.write_u32::<LittleEndian>(size)?; // uncompressed size
            out.write_u16::<LittleEndian>(name_len)?;
            out.write_u16::<LittleEndian>(0)?; // extra field length
            out.extend_from_slice(name);
            out.extend_from_slice(&entry.data);

            central.write_u32::<LittleEndian>(CDFH_SIGNATURE)?;
            central.write_u16::<LittleEndian>(VERSION_NEEDED)?; // version made by
            central.write_u16::<LittleEndian>(VERSION_NEEDED)?; // version needed
            central.write_u16::<LittleEndian>(0)?; // flags
            central.write_u16::<LittleEndian>(0)?; // method: store
            central.write_u16::<LittleEndian>(time)?;
            central.write_u16::<LittleEndian>(date)?;
            central.write_u32::<LittleEndian>(entry.crc32)?;
            central.write_u32::<LittleEndian>(size)?;
            central.write_u32::<LittleEndian>(size)?;
            central.write_u16::<LittleEndian>(name_len)?;
            central.write_u16::<LittleEndian>(0)?; // extra field length
            central.write_u16::<LittleEndian>(0)?; // comment length
            central.write_u16::<LittleEndian>(0)?; // disk number start
            central.write_u16::<LittleEndian>(0)?; // internal attributes
            central.write_u32::<LittleEndian>(0)?; // external attributes
            central.write_u32::<LittleEndian>(lfh_offset)?;
            central.extend_from_slice(name);
        }

        let cd_offset = checked_offset(out.len(), &self.entries)?;
        let cd_size = central.len() as u32;
        out.extend_from_slice(&central);

        out.write_u32::<LittleEndian>(EOCD_SIGNATURE)?;
        out.write_u16::<LittleEndian>(0)?; // disk number
        out.write_u16::<LittleEndian>(0)?; // disk with central directory
        out.write_u16::<LittleEndian>(entry_count)?; // entries on this disk
        out.write_u16::<LittleEndian>(entry_count)?; // total entries
        out.write_u32::<LittleEndian>(cd_size)?;
        out.write_u32::<LittleEndian>(cd_offset)?;
        out.write_u16::<LittleEndian>(0)?; // comment length

        debug!(entries = entry_count, bytes = out.len(), "archive serialized");
        Ok(out)
    }

    /// Write the archive to `path`, atomically from the caller's point of
    /// view: bytes go to a sibling temporary file which is renamed into place
    /// on success, so a failed write never leaves a file claiming to be a
    /// valid archive.
    pub async fn write_to(self, path: &Path) -> Result<()> {
        let bytes = self.finish()?;
        let tmp = path.with_extension("part");
        if let Err(e) = fs::write(&tmp, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = bytes.len(), "archive written");
        Ok(())
    }
}

impl Default for ZipWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack every regular file under `dir` into a ZIP archive at `dest`.
///
/// Returns the number of entries written.
pub async fn pack_directory(dir: &Path, dest: &Path) -> Result<usize> {
    let entries = collect_entries(dir).await?;
    let count = entries.len();
    let mut writer = ZipWriter::new();
    for entry in entries {
        writer.push(entry);
    }
    writer.write_to(dest).await?;
    Ok(count)
}

fn checked_offset(len: usize, entries: &[ArchiveEntry]) -> Result<u32> {
    u32::try_from(len).map_err(|_| ZipError::ArchiveTooLarge {
        entries: entries.len(),
        bytes: len as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::structures::{EOCD_SIZE, LFH_SIZE};

    #[test]
    fn entry_precomputes_checksum() {
        let entry = ArchiveEntry::from_bytes("a.txt", b"hello".to_vec());
        assert_eq!(entry.crc32(), 0x3610_A686);
        assert_eq!(entry.len(), 5);
    }

    #[test]
    fn empty_writer_emits_bare_trailer() {
        let archive = ZipWriter::new().finish().unwrap();
        assert_eq!(archive.len(), EOCD_SIZE);
        assert_eq!(&archive[0..4], b"PK\x05\x06");
        // Entry counts, sizes, and offsets are all zero.
        assert!(archive[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn local_header_layout() {
        let mut writer = ZipWriter::new();
        writer.push(ArchiveEntry::from_bytes("a.txt", b"hello".to_vec()));
        let archive = writer.finish().unwrap();

        assert_eq!(&archive[0..4], b"PK\x03\x04");
        // version-needed = 20, flags = 0, method = 0 (store)
        assert_eq!(&archive[4..6], &20u16.to_le_bytes());
        assert_eq!(&archive[6..8], &0u16.to_le_bytes());
        assert_eq!(&archive[8..10], &0u16.to_le_bytes());
        // crc32 of "hello"
        assert_eq!(&archive[14..18], &0x3610_A686u32.to_le_bytes());
        // compressed size == uncompressed size == 5
        assert_eq!(&archive[18..22], &5u32.to_le_bytes());
        assert_eq!(&archive[22..26], &5u32.to_le_bytes());
        // name length 5, extra length 0
        assert_eq!(&archive[26..28], &5u16.to_le_bytes());
        assert_eq!(&archive[28..30], &0u16.to_le_bytes());
        assert_eq!(&archive[LFH_SIZE..LFH_SIZE + 5], b"a.txt");
        assert_eq!(&archive[LFH_SIZE + 5..LFH_SIZE + 10], b"hello");
    }

    #[test]
    fn trailer_counts_and_offsets() {
        let mut writer = ZipWriter::new();
        writer.push(ArchiveEntry::from_bytes("a.txt", b"hello".to_vec()));
        writer.push(ArchiveEntry::from_bytes("sub/b.txt", Vec::new()));
        let archive = writer.finish().unwrap();

        let eocd = &archive[archive.len() - EOCD_SIZE..];
        assert_eq!(&eocd[0..4], b"PK\x05\x06");
        assert_eq!(u16::from_le_bytes([eocd[8], eocd[9]]), 2); // this disk
        assert_eq!(u16::from_le_bytes([eocd[10], eocd[11]]), 2); // total

        let cd_size = u32::from_le_bytes([eocd[12], eocd[13], eocd[14], eocd[15]]) as usize;
        let cd_offset = u32::from_le_bytes([eocd[16], eocd[17], eocd[18], eocd[19]]) as usize;
        assert_eq!(cd_offset + cd_size + EOCD_SIZE, archive.len());
        assert_eq!(&archive[cd_offset..cd_offset + 4], b"PK\x01\x02");
    }
}
