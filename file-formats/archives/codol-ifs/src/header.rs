//! IFS archive header structures and parsing

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// IFS archive signature ('ifs\0', little-endian)
pub const IFS_HEADER_SIGNATURE: u32 = 0x7366_696E;

/// Fixed on-disk size of [`IfsHeader`]
pub const IFS_HEADER_SIZE: u64 = 0x5C;

/// IFS archives carry a single fixed-layout header; unlike MPQ there is no
/// per-version header size to branch on.
#[derive(Debug, Clone)]
pub struct IfsHeader {
    /// Size of this header in bytes, as recorded on disk
    pub header_size: u32,
    /// Format version
    pub version: u16,
    /// Sector size used for block-aligned reads
    pub sector_size: u16,
    /// Total size of the archive file
    pub archive_size: u64,
    /// Offset of the BET table
    pub bet_table_pos: u64,
    /// Offset of the HET table
    pub het_table_pos: u64,
    /// Offset of the MD5 piece table
    pub md5_table_pos: u64,
    /// Offset of the presence bitmap
    pub bitmap_pos: u64,
    /// Size in bytes of the HET table block
    pub het_table_size: u64,
    /// Size in bytes of the BET table block
    pub bet_table_size: u64,
    /// Size in bytes of the MD5 piece table
    pub md5_table_size: u64,
    /// Size in bytes of the presence bitmap
    pub bitmap_size: u64,
    /// Granularity of each MD5 piece
    pub md5_piece_size: u32,
    /// Raw chunk size used for MD5 piece hashing
    pub raw_chunk_size: u32,
}

impl IfsHeader {
    /// Read the archive header from the start of the stream.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != IFS_HEADER_SIGNATURE {
            return Err(Error::invalid_format(format!(
                "invalid IFS signature: 0x{magic:08X}"
            )));
        }

        let header_size = reader.read_u32::<LittleEndian>()?;
        let version = reader.read_u16::<LittleEndian>()?;
        let sector_size = reader.read_u16::<LittleEndian>()?;
        let archive_size = reader.read_u64::<LittleEndian>()?;
        let bet_table_pos = reader.read_u64::<LittleEndian>()?;
        let het_table_pos = reader.read_u64::<LittleEndian>()?;
        let md5_table_pos = reader.read_u64::<LittleEndian>()?;
        let bitmap_pos = reader.read_u64::<LittleEndian>()?;
        let het_table_size = reader.read_u64::<LittleEndian>()?;
        let bet_table_size = reader.read_u64::<LittleEndian>()?;
        let md5_table_size = reader.read_u64::<LittleEndian>()?;
        let bitmap_size = reader.read_u64::<LittleEndian>()?;
        let md5_piece_size = reader.read_u32::<LittleEndian>()?;
        let raw_chunk_size = reader.read_u32::<LittleEndian>()?;

        if (header_size as u64) < IFS_HEADER_SIZE {
            return Err(Error::invalid_format(format!(
                "header size {header_size} smaller than expected {IFS_HEADER_SIZE}"
            )));
        }

        Ok(IfsHeader {
            header_size,
            version,
            sector_size,
            archive_size,
            bet_table_pos,
            het_table_pos,
            md5_table_pos,
            bitmap_pos,
            het_table_size,
            bet_table_size,
            md5_table_size,
            bitmap_size,
            md5_piece_size,
            raw_chunk_size,
        })
    }

    /// Render a human-readable summary, mirroring `debug_dump` conventions
    /// used elsewhere in this crate.
    pub fn debug_dump(&self) -> String {
        format!(
            "IFS Header\n\
             ==========\n\
             Header Size: {}\n\
             Version: {}\n\
             Sector Size: {}\n\
             Archive Size: {} bytes\n\
             HET Table: offset=0x{:016X} size={} bytes\n\
             BET Table: offset=0x{:016X} size={} bytes\n\
             MD5 Table: offset=0x{:016X} size={} bytes\n\
             Bitmap: offset=0x{:016X} size={} bytes\n\
             MD5 Piece Size: {}\n\
             Raw Chunk Size: {}\n",
            self.header_size,
            self.version,
            self.sector_size,
            self.archive_size,
            self.het_table_pos,
            self.het_table_size,
            self.bet_table_pos,
            self.bet_table_size,
            self.md5_table_pos,
            self.md5_table_size,
            self.bitmap_pos,
            self.bitmap_size,
            self.md5_piece_size,
            self.raw_chunk_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    fn sample_header_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(IFS_HEADER_SIGNATURE).unwrap();
        buf.write_u32::<LittleEndian>(IFS_HEADER_SIZE as u32).unwrap();
        buf.write_u16::<LittleEndian>(1).unwrap();
        buf.write_u16::<LittleEndian>(0x8000).unwrap();
        buf.write_u64::<LittleEndian>(4096).unwrap();
        buf.write_u64::<LittleEndian>(0x100).unwrap();
        buf.write_u64::<LittleEndian>(0x200).unwrap();
        buf.write_u64::<LittleEndian>(0).unwrap();
        buf.write_u64::<LittleEndian>(0).unwrap();
        buf.write_u64::<LittleEndian>(64).unwrap();
        buf.write_u64::<LittleEndian>(64).unwrap();
        buf.write_u64::<LittleEndian>(0).unwrap();
        buf.write_u64::<LittleEndian>(0).unwrap();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf
    }

    #[test]
    fn reads_valid_header() {
        let bytes = sample_header_bytes();
        let mut cursor = Cursor::new(bytes);
        let header = IfsHeader::read(&mut cursor).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.sector_size, 0x8000);
        assert_eq!(header.het_table_pos, 0x100);
        assert_eq!(header.bet_table_pos, 0x200);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut bytes = sample_header_bytes();
        bytes[0] = 0;
        let mut cursor = Cursor::new(bytes);
        assert!(IfsHeader::read(&mut cursor).is_err());
    }
}
