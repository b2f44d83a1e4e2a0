use chrono::{DateTime, Datelike, Local, Timelike};
use std::ops::Range;

/// ZIP compression methods. This codec only ever writes store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Local File Header (LFH) - 4-byte signature + 26-byte fixed part
pub const LFH_SIGNATURE: u32 = 0x0403_4B50;
pub const LFH_SIZE: usize = 30;

/// Central Directory File Header (CDFH) - 46 bytes fixed part
pub const CDFH_SIGNATURE: u32 = 0x0201_4B50;

/// End of Central Directory (EOCD) - 22 bytes with an empty comment
pub const EOCD_SIGNATURE: u32 = 0x0605_4B50;
pub const EOCD_SIZE: usize = 22;

/// Version 2.0, the minimum that understands store entries and directories.
pub const VERSION_NEEDED: u16 = 20;

/// Pack a timestamp into the DOS `(time, date)` field pair.
///
/// The encoding has 2-second resolution and a representable year range of
/// 1980-2107; out-of-range years are clamped.
pub fn dos_datetime(dt: DateTime<Local>) -> (u16, u16) {
    let time =
        ((dt.hour() as u16) << 11) | ((dt.minute() as u16) << 5) | (dt.second() as u16 / 2);
    let year = dt.year().clamp(1980, 2107) as u16;
    let date = ((year - 1980) << 9) | ((dt.month() as u16) << 5) | dt.day() as u16;
    (time, date)
}

/// Parsed ZIP file entry information (reader side).
#[derive(Debug, Clone)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub crc32: u32,
    pub lfh_offset: u64,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    /// Byte range of the entry's content within the archive buffer.
    pub(crate) data: Range<usize>,
}

impl ZipFileEntry {
    /// Directory entries carry a trailing `/` and no content.
    pub fn is_directory(&self) -> bool {
        self.file_name.ends_with('/')
    }

    /// Parse modification date to (year, month, day)
    pub fn mod_date(&self) -> (u16, u8, u8) {
        let day = (self.last_mod_date & 0x1F) as u8;
        let month = ((self.last_mod_date >> 5) & 0x0F) as u8;
        let year = ((self.last_mod_date >> 9) & 0x7F) + 1980;
        (year, month, day)
    }

    /// Parse modification time to (hour, minute, second)
    pub fn mod_time(&self) -> (u8, u8, u8) {
        let second = ((self.last_mod_time & 0x1F) * 2) as u8;
        let minute = ((self.last_mod_time >> 5) & 0x3F) as u8;
        let hour = ((self.last_mod_time >> 11) & 0x1F) as u8;
        (hour, minute, second)
    }
}
