//! In-memory buffer backend: a cursor over an owned byte buffer.

use crate::le::LittleEndianValue;

/// A cursor-based reader over an owned in-memory buffer.
///
/// Used for the packed bone-id/frame/payload streams the animation and
/// model decoders consume: each logical stream is its own `BufferReader`
/// instance with an independent cursor, so advancing one never disturbs
/// another.
#[derive(Debug, Clone)]
pub struct BufferReader {
    data: Vec<u8>,
    position: usize,
}

impl BufferReader {
    /// Wrap an owned buffer, cursor starting at zero.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    /// Total length of the underlying buffer.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes remaining before the cursor reaches the end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move the cursor to an absolute position. Positions past the end are
    /// permitted; subsequent reads simply return zeroed values or short
    /// buffers, matching the process-backend's reported-short-read contract.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Read a typed little-endian value, advancing the cursor by its width
    /// regardless of how many bytes were actually available. This keeps
    /// stream cursors aligned even when a stage's payload read comes up
    /// short.
    pub fn read<T: LittleEndianValue>(&mut self) -> T {
        let end = (self.position + T::SIZE).min(self.data.len());
        let start = self.position.min(self.data.len());
        let value = T::from_le_slice(&self.data[start..end]);
        self.position += T::SIZE;
        value
    }

    /// Read `n` bytes as an owned buffer. Returns fewer than `n` bytes (but
    /// never panics) if the stream is exhausted; the cursor still advances
    /// by the requested `n` so later stages see correctly offset cursors
    /// computed from header fields.
    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        let start = self.position.min(self.data.len());
        let end = (self.position + n).min(self.data.len());
        let bytes = self.data[start..end].to_vec();
        self.position += n;
        bytes
    }

    /// Read a NUL-terminated string starting at the current position,
    /// advancing the cursor past the terminator. Returns an empty string if
    /// the cursor is already past the end or no terminator is found.
    pub fn read_cstring(&mut self) -> String {
        let start = self.position.min(self.data.len());
        let rest = &self.data[start..];
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        let s = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.position = start + end + 1;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sequential_typed_values() {
        let mut reader = BufferReader::new(vec![0x01, 0x00, 0x00, 0x00, 0xFF, 0x00]);
        assert_eq!(reader.read::<u32>(), 1);
        assert_eq!(reader.read::<u16>(), 0xFF);
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn short_read_past_end_still_advances_cursor() {
        let mut reader = BufferReader::new(vec![0x01, 0x02]);
        reader.seek(1);
        let v: u32 = reader.read();
        assert_eq!(v, 0x02);
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn read_bytes_truncates_at_end() {
        let mut reader = BufferReader::new(vec![1, 2, 3]);
        let bytes = reader.read_bytes(10);
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn reads_nul_terminated_string() {
        let mut reader = BufferReader::new(b"tag_origin\0trailing".to_vec());
        assert_eq!(reader.read_cstring(), "tag_origin");
        assert_eq!(reader.position(), 11);
    }

    #[test]
    fn cstring_without_terminator_consumes_rest() {
        let mut reader = BufferReader::new(b"no_terminator".to_vec());
        assert_eq!(reader.read_cstring(), "no_terminator");
        assert_eq!(reader.remaining(), 0);
    }
}
