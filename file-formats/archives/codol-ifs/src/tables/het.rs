//! HET (Hash Entry Table) header.
//!
//! Only the fixed-field header is ever parsed; the rest of the HET block
//! (its name-hash array and bit-packed file indices) is never consulted by
//! entry resolution, which works entirely off the BET table's own embedded
//! hashes instead. `hash_entry_size` is read here purely to derive the
//! masking applied to BET hashes.

use super::common::{ReadLittleEndian, decrypt_table_data};
use crate::{Error, Result};
use std::io::{Read, Seek, SeekFrom};

/// Signature 'HET\x1A', little-endian
const SIGNATURE: u32 = 0x1A54_4548;

#[derive(Debug, Clone, Copy)]
struct ExtHeader {
    signature: u32,
    #[allow(dead_code)]
    version: u32,
    data_size: u32,
}

impl ExtHeader {
    const SIZE: usize = 12;

    fn read(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::invalid_format("HET block too small for header"));
        }
        let mut cursor = std::io::Cursor::new(data);
        Ok(Self {
            signature: cursor.read_u32_le()?,
            version: cursor.read_u32_le()?,
            data_size: cursor.read_u32_le()?,
        })
    }
}

/// `IFSHetTable`: fixed-field header, 32 bytes
#[derive(Debug, Clone, Copy)]
pub struct HetHeader {
    /// Size of the entire hash table including this header
    pub table_size: u32,
    /// Maximum number of files the archive can hold
    pub entry_count: u32,
    /// Number of rows in the (unused) name-hash array
    pub hash_table_size: u32,
    /// Bit width a BET hash is masked down to before lookup
    pub hash_entry_size: u32,
    /// Total size in bits of the (unused) file-index subtable
    pub index_size_total: u32,
    /// Extra bits per file index beyond `index_size`
    pub index_size_extra: u32,
    /// Effective bit width of each file index
    pub index_size: u32,
    /// Size in bytes of the BET block that follows this table
    pub block_table_size: u32,
}

impl HetHeader {
    const SIZE: usize = 32;

    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::invalid_format("HET header too small"));
        }
        let mut cursor = std::io::Cursor::new(data);
        Ok(Self {
            table_size: cursor.read_u32_le()?,
            entry_count: cursor.read_u32_le()?,
            hash_table_size: cursor.read_u32_le()?,
            hash_entry_size: cursor.read_u32_le()?,
            index_size_total: cursor.read_u32_le()?,
            index_size_extra: cursor.read_u32_le()?,
            index_size: cursor.read_u32_le()?,
            block_table_size: cursor.read_u32_le()?,
        })
    }
}

/// HET table as consulted by this crate: just the header.
#[derive(Debug)]
pub struct HetTable {
    pub header: HetHeader,
}

impl HetTable {
    /// Read and decrypt the HET block at `offset`, returning its header.
    ///
    /// `key` is `keyed_hash("(hash table)", hash_type::FILE_KEY)`. The
    /// on-disk block is zero-padded to a whole number of dwords before the
    /// source encrypts it, so we do the same before decrypting.
    pub fn read<R: Read + Seek>(reader: &mut R, offset: u64, key: u32) -> Result<Self> {
        reader.seek(SeekFrom::Start(offset))?;

        let mut ext_bytes = [0u8; ExtHeader::SIZE];
        reader.read_exact(&mut ext_bytes)?;
        let ext = ExtHeader::read(&ext_bytes)?;
        if ext.signature != SIGNATURE {
            return Err(Error::invalid_format("invalid HET extended signature"));
        }

        let dword_count = (ext.data_size as usize).div_ceil(4);
        let mut data = vec![0u8; dword_count * 4];
        reader.read_exact(&mut data[..ext.data_size as usize])?;

        decrypt_table_data(&mut data, key);

        Ok(Self {
            header: HetHeader::parse(&data)?,
        })
    }

    /// The `(and_mask, or_mask)` pair a BET lookup hash is folded through,
    /// derived from `hash_entry_size`.
    pub fn masks(&self) -> (u64, u64) {
        let bits = self.header.hash_entry_size;
        let mut and_mask = if bits == 64 { u64::MAX } else { 1u64 << bits };
        and_mask = and_mask.wrapping_sub(1);
        let or_mask = if bits > 0 { 1u64 << (bits - 1) } else { 0 };
        (and_mask, or_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};

    fn sample_block(hash_entry_size: u32) -> Vec<u8> {
        let mut header = Vec::new();
        header.write_u32::<LittleEndian>(0).unwrap(); // table_size
        header.write_u32::<LittleEndian>(16).unwrap(); // entry_count
        header.write_u32::<LittleEndian>(0).unwrap(); // hash_table_size
        header.write_u32::<LittleEndian>(hash_entry_size).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap(); // index_size_total
        header.write_u32::<LittleEndian>(0).unwrap(); // index_size_extra
        header.write_u32::<LittleEndian>(0).unwrap(); // index_size
        header.write_u32::<LittleEndian>(0).unwrap(); // block_table_size
        header
    }

    #[test]
    fn masks_derive_from_hash_entry_size() {
        let table = HetTable {
            header: HetHeader {
                table_size: 0,
                entry_count: 0,
                hash_table_size: 0,
                hash_entry_size: 48,
                index_size_total: 0,
                index_size_extra: 0,
                index_size: 0,
                block_table_size: 0,
            },
        };
        let (and_mask, or_mask) = table.masks();
        assert_eq!(and_mask, (1u64 << 48) - 1);
        assert_eq!(or_mask, 1u64 << 47);
    }

    #[test]
    fn parses_header_fields() {
        let block = sample_block(48);
        let header = HetHeader::parse(&block).unwrap();
        assert_eq!(header.entry_count, 16);
        assert_eq!(header.hash_entry_size, 48);
    }
}
