//! Zlib/deflate decompression for archive payloads

use crate::Result;
use crate::error::Error;
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Decompress the single zlib stream an entry payload decrypts to.
pub(crate) fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::with_capacity(expected_size);

    decoder.read_to_end(&mut decompressed).map_err(|e| {
        log::debug!("zlib decompression failed: {e}");
        Error::compression(format!("zlib decompression failed: {e}"))
    })?;

    if decompressed.len() != expected_size {
        log::debug!(
            "decompressed size mismatch: expected {}, got {}",
            expected_size,
            decompressed.len()
        );
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    #[test]
    fn round_trip() {
        let original = b"codol archive payload for round trip testing";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        let decompressed = decompress(&compressed, original.len()).unwrap();
        assert_eq!(decompressed, original);
    }
}
