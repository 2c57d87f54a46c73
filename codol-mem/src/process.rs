//! Process-memory backend: typed reads against a remote process's address
//! space.

use crate::error::{Error, Result};
use crate::le::LittleEndianValue;
use std::fmt;

/// Abstracts the platform-specific mechanics of attaching to a process and
/// reading its memory. Attaching, module enumeration, and the actual
/// syscalls used to read another process's memory are plumbing external to
/// this crate; implement this trait against whatever injection or
/// debugging API the host platform provides.
pub trait ProcessMemorySource: fmt::Debug {
    /// Attach to the named process.
    fn attach(&mut self, process_name: &str) -> Result<()>;

    /// Base address of the process's main module, once attached.
    fn main_module_address(&self) -> Option<u64>;

    /// Read up to `length` bytes starting at `address`. Returns the bytes
    /// actually read; a short read is reported back to the caller rather
    /// than treated as an error.
    fn read_bytes(&self, address: u64, length: usize) -> Vec<u8>;
}

const CSTRING_CHUNK: usize = 64;
const CSTRING_MAX_CHUNKS: usize = 64;

/// Typed reader over a [`ProcessMemorySource`].
///
/// Game pointers stored on-disk or in process structures are 32-bit;
/// widen them with [`crate::le::widen_pointer`] before passing them here as
/// `address`, never truncate the 64-bit address space the backend itself
/// operates in.
#[derive(Debug)]
pub struct ProcessReader<S> {
    source: S,
}

impl<S: ProcessMemorySource> ProcessReader<S> {
    /// Wrap a process-memory source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Attach to the named process.
    pub fn attach(&mut self, process_name: &str) -> Result<()> {
        self.source.attach(process_name)
    }

    /// Base address of the attached process's main module.
    pub fn main_module_address(&self) -> Result<u64> {
        self.source
            .main_module_address()
            .ok_or_else(|| Error::BadModule("main module not resolved".into()))
    }

    /// Read raw bytes, reporting the actual length read alongside the
    /// buffer so the caller can detect a short read explicitly.
    pub fn read_at(&self, address: u64, length: usize) -> (Vec<u8>, usize) {
        let buf = self.source.read_bytes(address, length);
        let actual = buf.len();
        (buf, actual)
    }

    /// Read a typed little-endian value. A short or failed remote read
    /// decodes as zero; callers that need to distinguish a short read use
    /// [`Self::read_at`] directly.
    pub fn read<T: LittleEndianValue>(&self, address: u64) -> T {
        let buf = self.source.read_bytes(address, T::SIZE);
        T::from_le_slice(&buf)
    }

    /// Read a NUL-terminated string starting at `address`, fetched in
    /// fixed-size chunks until a terminator is found or a generous upper
    /// bound on chunks is hit.
    pub fn read_cstring(&self, address: u64) -> String {
        let mut out = Vec::new();
        for chunk_index in 0..CSTRING_MAX_CHUNKS {
            let offset = address + (chunk_index * CSTRING_CHUNK) as u64;
            let chunk = self.source.read_bytes(offset, CSTRING_CHUNK);
            if chunk.is_empty() {
                break;
            }
            match chunk.iter().position(|&b| b == 0) {
                Some(nul) => {
                    out.extend_from_slice(&chunk[..nul]);
                    break;
                }
                None => out.extend_from_slice(&chunk),
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// A cursor over a [`ProcessReader`], advancing an address the same way
/// [`crate::buffer::BufferReader`] advances a position.
///
/// Decoders that walk a sequence of fields at increasing addresses (the
/// `Ptr += size` pattern of the original reader) use this instead of
/// repeating `reader.read(address)` calls with hand-tracked offsets; it
/// gives the process backend the same `read::<T>()`/`read_bytes(n)` shape
/// as the buffer backend so decoder logic can stay backend-agnostic.
#[derive(Debug)]
pub struct ProcessCursor<'a, S> {
    reader: &'a ProcessReader<S>,
    address: u64,
}

impl<'a, S: ProcessMemorySource> ProcessCursor<'a, S> {
    /// Start a cursor at `address` over `reader`.
    pub fn new(reader: &'a ProcessReader<S>, address: u64) -> Self {
        Self { reader, address }
    }

    /// Current cursor address.
    pub fn position(&self) -> u64 {
        self.address
    }

    /// The reader this cursor walks, for spawning another cursor over the
    /// same backing process at an unrelated address.
    pub fn reader(&self) -> &'a ProcessReader<S> {
        self.reader
    }

    /// Move the cursor to an absolute address.
    pub fn seek(&mut self, address: u64) {
        self.address = address;
    }

    /// Read a typed little-endian value at the cursor, advancing by its
    /// width regardless of whether the remote read came up short.
    pub fn read<T: LittleEndianValue>(&mut self) -> T {
        let value = self.reader.read(self.address);
        self.address += T::SIZE as u64;
        value
    }

    /// Read `n` bytes at the cursor, advancing by `n` even if fewer bytes
    /// were actually available.
    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        let (buf, _actual) = self.reader.read_at(self.address, n);
        self.address += n as u64;
        buf
    }

    /// Read a NUL-terminated string at the cursor, advancing past the
    /// terminator (or past the scan limit if none was found).
    pub fn read_cstring(&mut self) -> String {
        let s = self.reader.read_cstring(self.address);
        self.address += s.len() as u64 + 1;
        s
    }
}
