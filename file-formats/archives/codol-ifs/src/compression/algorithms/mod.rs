//! Decompression algorithm implementations

pub(super) mod zlib;
