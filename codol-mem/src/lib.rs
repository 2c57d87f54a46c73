//! Typed byte-stream reading over two backends sharing one read contract:
//! a process-memory window and an in-memory buffer.
//!
//! Both backends expose fixed-width little-endian integer and float reads
//! plus sized byte buffers; a short or out-of-range read never panics, it
//! reports fewer bytes (process backend) or decodes as zero while still
//! advancing the cursor (buffer backend), so a decoder's stream cursors stay
//! aligned across stages even when a particular read comes up short.
//!
//! ## Example
//!
//! ```
//! use codol_mem::BufferReader;
//!
//! let mut reader = BufferReader::new(vec![0x2A, 0x00, 0x00, 0x00]);
//! let value: u32 = reader.read();
//! assert_eq!(value, 42);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod buffer;
pub mod error;
pub mod le;
pub mod process;

pub use buffer::BufferReader;
pub use error::{Error, Result};
pub use le::{LittleEndianValue, half_to_f32, widen_pointer};
pub use process::{ProcessCursor, ProcessMemorySource, ProcessReader};

/// Common cursor shape shared by [`BufferReader`] and [`ProcessCursor`], so
/// decoder logic that walks a sequence of fields can stay generic over
/// which backend actually produced the bytes.
pub trait StreamReader {
    /// Read a typed little-endian value, advancing the cursor by its width.
    fn read_value<T: LittleEndianValue>(&mut self) -> T;

    /// Read `n` bytes, advancing the cursor by `n`.
    fn read_bytes(&mut self, n: usize) -> Vec<u8>;

    /// Read a NUL-terminated string, advancing the cursor past it.
    fn read_cstring(&mut self) -> String;
}

impl StreamReader for BufferReader {
    fn read_value<T: LittleEndianValue>(&mut self) -> T {
        self.read()
    }

    fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        self.read_bytes(n)
    }

    fn read_cstring(&mut self) -> String {
        self.read_cstring()
    }
}

impl<'a, S: ProcessMemorySource> StreamReader for ProcessCursor<'a, S> {
    fn read_value<T: LittleEndianValue>(&mut self) -> T {
        self.read()
    }

    fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        self.read_bytes(n)
    }

    fn read_cstring(&mut self) -> String {
        self.read_cstring()
    }
}

/// Start an independent cursor at an absolute address within the same
/// backing store as `self`, without disturbing `self`'s own position.
///
/// Some decoder fields are pointers read out of the middle of one stream
/// that point at an unrelated location in the same address space (a
/// classic example: a delta-data pointer read from inside the delta-header
/// stream, pointing at a separate packed-coordinate table). `spawn` is how
/// a decoder follows that jump while staying generic over the backend.
pub trait Spawn {
    /// Start a new cursor at `address`.
    fn spawn(&self, address: u64) -> Self;
}

impl Spawn for BufferReader {
    fn spawn(&self, address: u64) -> Self {
        let mut clone = self.clone();
        clone.seek(address as usize);
        clone
    }
}

impl<'a, S: ProcessMemorySource> Spawn for ProcessCursor<'a, S> {
    fn spawn(&self, address: u64) -> Self {
        Self::new(self.reader(), address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_spawn_starts_an_independent_cursor() {
        let mut original = BufferReader::new(vec![1, 2, 3, 4, 5, 6]);
        let _: u8 = original.read_value();
        let mut spawned = original.spawn(4);
        assert_eq!(original.position(), 1);
        assert_eq!(spawned.read_value::<u8>(), 5);
        assert_eq!(original.position(), 1);
    }
}
