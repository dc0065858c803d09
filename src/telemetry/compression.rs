use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use tracing::error;

use crate::telemetry::errors::RequestError;

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Gzip at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, RequestError> {
    compress_with_level(data, DEFAULT_COMPRESSION_LEVEL)
}

/// Gzip at `level`, clamped to 0..=9. There is no uncompressed fallback:
/// an encoder failure fails the whole build.
pub fn compress_with_level(data: &[u8], level: u32) -> Result<Vec<u8>, RequestError> {
    let level = Compression::new(level.min(MAX_COMPRESSION_LEVEL));
    let result = (|| -> std::io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), level);
        encoder.write_all(data)?;
        encoder.finish()
    })();

    result.map_err(|e| {
        error!("Failed to compress data: {e}");
        RequestError::Compression(e)
    })
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>, RequestError> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(RequestError::Decompression)?;
    Ok(decompressed)
}
