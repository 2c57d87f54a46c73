//! Entry payload decompression

use super::algorithms;
use crate::Result;

/// Decompress a decrypted entry payload into its unpacked form.
///
/// Every archive entry is zlib-compressed as a single stream once decrypted; there is
/// no per-block method byte to dispatch on.
pub fn decompress(data: &[u8], unpacked_size: usize) -> Result<Vec<u8>> {
    log::debug!(
        "decompressing {} bytes to {} bytes",
        data.len(),
        unpacked_size
    );
    algorithms::zlib::decompress(data, unpacked_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    #[test]
    fn decompresses_zlib_stream() {
        let original = b"extracted asset bytes";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        let result = decompress(&compressed, original.len()).unwrap();
        assert_eq!(result, original);
    }
}
