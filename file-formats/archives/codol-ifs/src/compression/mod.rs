//! Decompression for archive entry payloads

mod algorithms;
mod decompress;

pub use decompress::decompress;
