//! BET (Block Entry Table): the authoritative file-entry table.
//!
//! Every file's position, size and flags live here, keyed by a masked
//! Jenkins lookup hash of its name rather than by a HET-resolved row index -
//! the HET table's own name-hash array is never consulted.

use super::common::{ReadLittleEndian, decrypt_table_data, read_bits};
use crate::{Error, Result};
use std::io::{Read, Seek, SeekFrom};

/// Signature 'BET\x1A', little-endian
const SIGNATURE: u32 = 0x1A54_4542;
/// Signature 'HET\x1A', little-endian, to recognize swapped table offsets
const HET_SIGNATURE: u32 = 0x1A54_4548;

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
            return Err(Error::invalid_format("BET block too small for header"));
        }
        let mut cursor = std::io::Cursor::new(data);
        Ok(Self {
            signature: cursor.read_u32_le()?,
            version: cursor.read_u32_le()?,
            data_size: cursor.read_u32_le()?,
        })
    }
}

/// `IFSBetTable`: fixed-field header, 84 bytes
#[derive(Debug, Clone, Copy)]
pub struct BetHeader {
    pub table_size: u32,
    pub entry_count: u32,
    pub table_entry_size: u32,
    pub bit_index_file_pos: u32,
    pub bit_index_file_size: u32,
    pub bit_index_cmp_size: u32,
    pub bit_index_flag_pos: u32,
    pub bit_index_hash_pos: u32,
    pub unknown_repeat_pos: u32,
    pub bit_count_file_pos: u32,
    pub bit_count_file_size: u32,
    pub bit_count_cmp_size: u32,
    pub bit_count_flag_size: u32,
    pub bit_count_hash_size: u32,
    pub unknown_zero: u32,
    pub hash_size_total: u32,
    pub hash_size_extra: u32,
    pub hash_size: u32,
    pub hash_part1: u32,
    pub hash_part2: u32,
    pub hash_array_size: u32,
}

impl BetHeader {
    const SIZE: usize = 84;

    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::invalid_format("BET header too small"));
        }
        let mut c = std::io::Cursor::new(data);
        Ok(Self {
            table_size: c.read_u32_le()?,
            entry_count: c.read_u32_le()?,
            table_entry_size: c.read_u32_le()?,
            bit_index_file_pos: c.read_u32_le()?,
            bit_index_file_size: c.read_u32_le()?,
            bit_index_cmp_size: c.read_u32_le()?,
            bit_index_flag_pos: c.read_u32_le()?,
            bit_index_hash_pos: c.read_u32_le()?,
            unknown_repeat_pos: c.read_u32_le()?,
            bit_count_file_pos: c.read_u32_le()?,
            bit_count_file_size: c.read_u32_le()?,
            bit_count_cmp_size: c.read_u32_le()?,
            bit_count_flag_size: c.read_u32_le()?,
            bit_count_hash_size: c.read_u32_le()?,
            unknown_zero: c.read_u32_le()?,
            hash_size_total: c.read_u32_le()?,
            hash_size_extra: c.read_u32_le()?,
            hash_size: c.read_u32_le()?,
            hash_part1: c.read_u32_le()?,
            hash_part2: c.read_u32_le()?,
            hash_array_size: c.read_u32_le()?,
        })
    }
}

/// A single resolved file entry: position, sizes, flags and its raw BET hash.
#[derive(Debug, Clone, Copy)]
pub struct BetFileInfo {
    pub name_hash: u64,
    pub file_pos: u64,
    pub file_size: u64,
    pub compressed_size: u64,
    pub flags: u32,
}

/// BET table: header plus every entry, decoded once at load time.
#[derive(Debug)]
pub struct BetTable {
    pub header: BetHeader,
    pub entries: Vec<BetFileInfo>,
}

impl BetTable {
    /// Read, decrypt and fully decode the BET block at `offset`.
    ///
    /// `key` is `keyed_hash("(block table)", hash_type::FILE_KEY)`. Entries
    /// are packed as a stream of bit fields read sequentially - not by
    /// indexing with the header's `bit_index_*` fields, which the format
    /// carries but never actually uses for layout.
    pub fn read<R: Read + Seek>(reader: &mut R, offset: u64, key: u32) -> Result<Self> {
        reader.seek(SeekFrom::Start(offset))?;

        let mut ext_bytes = [0u8; ExtHeader::SIZE];
        reader.read_exact(&mut ext_bytes)?;
        let ext = ExtHeader::read(&ext_bytes)?;
        if ext.signature != SIGNATURE {
            if ext.signature == HET_SIGNATURE {
                return Err(Error::invalid_format(
                    "BET offset points to HET table - archive has swapped table offsets",
                ));
            }
            return Err(Error::invalid_format("invalid BET extended signature"));
        }

        let dword_count = (ext.data_size as usize).div_ceil(4);
        let mut data = vec![0u8; dword_count * 4];
        reader.read_exact(&mut data[..ext.data_size as usize])?;

        decrypt_table_data(&mut data, key);

        let header = BetHeader::parse(&data)?;
        let body = &data[BetHeader::SIZE..];

        let entry_table_size =
            (header.table_entry_size as usize * header.entry_count as usize).div_ceil(8);
        let hash_table_size =
            (header.hash_size_total as usize * header.entry_count as usize).div_ceil(8);

        if body.len() < entry_table_size + hash_table_size {
            return Err(Error::invalid_format(format!(
                "BET table data too small: have {} bytes, need {}",
                body.len(),
                entry_table_size + hash_table_size
            )));
        }

        let entry_table = &body[..entry_table_size];
        let hash_table = &body[entry_table_size..entry_table_size + hash_table_size];

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        let mut bit_offset = 0usize;
        let mut hash_offset = 0usize;

        for _ in 0..header.entry_count {
            let file_pos = read_bits(entry_table, bit_offset, header.bit_count_file_pos);
            bit_offset += header.bit_count_file_pos as usize;

            let file_size = read_bits(entry_table, bit_offset, header.bit_count_file_size);
            bit_offset += header.bit_count_file_size as usize;

            let compressed_size = read_bits(entry_table, bit_offset, header.bit_count_cmp_size);
            bit_offset += header.bit_count_cmp_size as usize;

            let flags = read_bits(entry_table, bit_offset, header.bit_count_flag_size) as u32;
            bit_offset += header.bit_count_flag_size as usize;

            // Skip the per-entry hash-array bits; resolution uses the
            // separate hash_table below instead.
            bit_offset += header.bit_count_hash_size as usize;
            bit_offset += header.hash_array_size as usize;

            let name_hash = read_bits(hash_table, hash_offset, header.hash_size_total);
            hash_offset += header.hash_size_total as usize;

            entries.push(BetFileInfo {
                name_hash,
                file_pos,
                file_size,
                compressed_size,
                flags,
            });
        }

        Ok(Self { header, entries })
    }

    /// Find the entry matching a masked BET hash (see
    /// [`crate::crypto::mask_hash`] and [`super::het::HetTable::masks`]).
    pub fn find_by_hash(&self, hash: u64) -> Option<&BetFileInfo> {
        self.entries.iter().find(|e| e.name_hash == hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header(entry_count: u32) -> BetHeader {
        BetHeader {
            table_size: 0,
            entry_count,
            table_entry_size: 64 + 16,
            bit_index_file_pos: 0,
            bit_index_file_size: 0,
            bit_index_cmp_size: 0,
            bit_index_flag_pos: 0,
            bit_index_hash_pos: 0,
            unknown_repeat_pos: 0,
            bit_count_file_pos: 32,
            bit_count_file_size: 16,
            bit_count_cmp_size: 16,
            bit_count_flag_size: 0,
            bit_count_hash_size: 0,
            unknown_zero: 0,
            hash_size_total: 40,
            hash_size_extra: 0,
            hash_size: 40,
            hash_part1: 0,
            hash_part2: 0,
            hash_array_size: 0,
        }
    }

    #[test]
    fn finds_entry_by_hash() {
        let table = BetTable {
            header: sample_header(2),
            entries: vec![
                BetFileInfo { name_hash: 111, file_pos: 10, file_size: 20, compressed_size: 20, flags: 0 },
                BetFileInfo { name_hash: 222, file_pos: 30, file_size: 40, compressed_size: 40, flags: 0 },
            ],
        };

        assert_eq!(table.find_by_hash(222).unwrap().file_pos, 30);
        assert!(table.find_by_hash(999).is_none());
    }
}
