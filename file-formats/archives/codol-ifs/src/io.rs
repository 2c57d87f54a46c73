//! I/O abstractions for IFS archives

use crate::Result;
use std::io::{Read, Seek, SeekFrom};

/// Trait for reading from IFS archives
pub trait IfsRead: Read + Seek {
    /// Read exact number of bytes at the given offset
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

/// Buffered reader for IFS archives
#[derive(Debug)]
pub struct BufferedIfsReader<R> {
    inner: R,
}

impl<R: Read + Seek> BufferedIfsReader<R> {
    /// Create a new buffered reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read + Seek> IfsRead for BufferedIfsReader<R> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }
}

impl<R: Read> Read for BufferedIfsReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for BufferedIfsReader<R> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}
