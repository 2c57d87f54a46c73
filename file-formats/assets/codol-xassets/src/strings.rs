//! C5: bone/tag name resolution by string-table index.
//!
//! Bone IDs decoded from animation and model streams are indices into a
//! fixed-stride string table, not inline names; resolving one means
//! computing an address and reading a NUL-terminated string there, not
//! walking a count-prefixed table.

use codol_mem::{ProcessCursor, ProcessMemorySource, ProcessReader, StreamReader};

/// Fixed byte stride between entries in the string table: a 4-byte header
/// the index skips over, then a 16-byte inline name buffer.
const STRING_TABLE_STRIDE: u64 = 20;

/// Resolves a bone/tag index to its name.
pub trait StringResolver {
    /// Resolve `index` to its string, or an empty string if the index is
    /// out of range or the table isn't available.
    fn resolve(&self, index: u64) -> String;
}

/// A [`StringResolver`] backed by a fixed-stride table read from process
/// memory, anchored at `base` (the pool's raw offset, not yet adjusted for
/// the table's own 4-byte header).
#[derive(Debug)]
pub struct StringTable<'a, S> {
    reader: &'a ProcessReader<S>,
    base: u64,
}

impl<'a, S: ProcessMemorySource> StringTable<'a, S> {
    /// Anchor a string table at `base`.
    pub fn new(reader: &'a ProcessReader<S>, base: u64) -> Self {
        Self { reader, base }
    }
}

impl<'a, S: ProcessMemorySource> StringResolver for StringTable<'a, S> {
    fn resolve(&self, index: u64) -> String {
        let address = (STRING_TABLE_STRIDE * index) + self.base + 4;
        let mut cursor = ProcessCursor::new(self.reader, address);
        cursor.read_cstring()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockProcess {
        base: u64,
        image: Vec<u8>,
    }

    impl ProcessMemorySource for MockProcess {
        fn attach(&mut self, _process_name: &str) -> codol_mem::Result<()> {
            Ok(())
        }

        fn main_module_address(&self) -> Option<u64> {
            Some(self.base)
        }

        fn read_bytes(&self, address: u64, length: usize) -> Vec<u8> {
            if address < self.base {
                return Vec::new();
            }
            let offset = (address - self.base) as usize;
            if offset >= self.image.len() {
                return Vec::new();
            }
            let end = (offset + length).min(self.image.len());
            self.image[offset..end].to_vec()
        }
    }

    #[test]
    fn resolves_index_at_fixed_stride() {
        let base = 0x1000u64;
        let mut image = vec![0u8; 64];
        // index 0 name lives at base + 4
        image[4..14].copy_from_slice(b"tag_origin");
        // index 1 name lives at base + 20 + 4
        image[24..31].copy_from_slice(b"j_spine");
        let process = MockProcess { base, image };
        let reader = ProcessReader::new(process);
        let table = StringTable::new(&reader, base);

        assert_eq!(table.resolve(0), "tag_origin");
        assert_eq!(table.resolve(1), "j_spine");
    }

    #[test]
    fn out_of_range_index_resolves_empty() {
        let process = MockProcess {
            base: 0x2000,
            image: vec![0u8; 8],
        };
        let reader = ProcessReader::new(process);
        let table = StringTable::new(&reader, 0x2000);
        assert_eq!(table.resolve(50), "");
    }
}
