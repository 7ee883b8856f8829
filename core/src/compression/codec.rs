//! compression/codec.rs
//! JSON + gzip codec with a hard cap on decompressed size.
//!
//! Write path: value → serde_json → GzEncoder, streamed, no plaintext buffer.
//! Read path: MultiGzDecoder → BoundedReader → serde_json, then the same bounded
//! reader is drained to the end of the blob so every member footer (CRC32,
//! ISIZE) is checked and bytes after the first member are not ignored.
use std::any::type_name;
use std::io::{self, BufReader, Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::compression::bounded::{BoundedRead, BoundedReader};
use crate::compression::types::{effective_limit, CodecConfig, CompressionError};
use crate::telemetry::{CodecCounters, CountingWriter};

/// Compress `data` as gzip-wrapped JSON with the default level.
///
/// `None` is rejected with `InvalidParams` before any work is done.
pub fn compress<T>(data: Option<&T>) -> Result<Vec<u8>, CompressionError>
where
    T: Serialize + ?Sized,
{
    compress_with(data, &CodecConfig::default())
}

/// Same as [`compress`], with the deflate level taken from `config`.
pub fn compress_with<T>(data: Option<&T>, config: &CodecConfig) -> Result<Vec<u8>, CompressionError>
where
    T: Serialize + ?Sized,
{
    let data = data.ok_or(CompressionError::NilData)?;

    let mut writer = CountingWriter::new(GzEncoder::new(Vec::new(), config.compression()));
    if let Err(source) = encode_line(&mut writer, data) {
        // Partial output is discarded with the encoder.
        drop(writer);
        let type_name = type_name::<T>();
        warn!(type_name, error = %source, "json encode failed");
        return Err(CompressionError::Encode { type_name, source });
    }

    let (encoder, plaintext) = writer.into_parts();
    let blob = encoder.finish().map_err(|e| {
        warn!(error = %e, "gzip finalize failed");
        CompressionError::Finalize(e)
    })?;

    let counters = CodecCounters::new(plaintext, blob.len() as u64);
    debug!(
        bytes_plaintext = counters.bytes_plaintext,
        bytes_compressed = counters.bytes_compressed,
        ratio = counters.compression_ratio(),
        "compressed value"
    );
    Ok(blob)
}

/// Decompress `compressed` into `out`, reading at most `max_uncompressed`
/// decompressed bytes (`<= 0` selects the 4 MiB default).
///
/// `out` is only written once the whole stream, footer included, has been
/// verified. On error it is left untouched.
pub fn decompress<T>(
    compressed: &[u8],
    out: Option<&mut T>,
    max_uncompressed: i64,
) -> Result<(), CompressionError>
where
    T: DeserializeOwned,
{
    decompress_into(compressed, out, effective_limit(max_uncompressed))
}

/// Same as [`decompress`], with the limit taken from `config`.
pub fn decompress_with<T>(
    compressed: &[u8],
    out: Option<&mut T>,
    config: &CodecConfig,
) -> Result<(), CompressionError>
where
    T: DeserializeOwned,
{
    decompress_into(compressed, out, config.limit())
}

fn decompress_into<T>(compressed: &[u8], out: Option<&mut T>, limit: u64) -> Result<(), CompressionError>
where
    T: DeserializeOwned,
{
    if compressed.is_empty() {
        return Err(CompressionError::EmptyInput);
    }
    let out = out.ok_or(CompressionError::NilOutput)?;

    *out = decode_bounded(compressed, limit)?;
    Ok(())
}

fn encode_line<W, T>(w: &mut W, data: &T) -> Result<(), serde_json::Error>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *w, data)?;
    w.write_all(b"\n").map_err(serde_json::Error::io)
}

fn open_decoder(compressed: &[u8]) -> Result<MultiGzDecoder<&[u8]>, CompressionError> {
    let mut decoder = MultiGzDecoder::new(compressed);
    if decoder.header().is_some() {
        return Ok(decoder);
    }

    // A failed header parse is parked inside the decoder until the first read.
    let cause = match decoder.read(&mut []) {
        Err(e) => e,
        Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "incomplete gzip header"),
    };
    Err(CompressionError::Decompressor(cause))
}

fn decode_bounded<T>(compressed: &[u8], limit: u64) -> Result<T, CompressionError>
where
    T: DeserializeOwned,
{
    let decoder = open_decoder(compressed)?;
    let mut reader = BoundedReader::new(BufReader::new(decoder), limit);

    let decoded = {
        let mut de = serde_json::Deserializer::from_reader(&mut reader);
        T::deserialize(&mut de)
    };
    let value = match decoded {
        Ok(value) => value,
        Err(_) if reader.is_exhausted() => return Err(limit_exceeded(limit)),
        Err(e) => return Err(CompressionError::Decode(e)),
    };

    // Footers are only checked at true end of stream; trailing members and
    // junk after the last footer are charged against the same budget.
    match reader.drain() {
        Ok(BoundedRead::End) => {}
        Ok(_) => return Err(limit_exceeded(limit)),
        Err(e) => {
            warn!(error = %e, "gzip stream verification failed");
            return Err(CompressionError::Verify(e));
        }
    }

    let counters = CodecCounters::new(reader.consumed(), compressed.len() as u64);
    debug!(
        bytes_plaintext = counters.bytes_plaintext,
        bytes_compressed = counters.bytes_compressed,
        limit = reader.limit(),
        "decompressed value"
    );
    Ok(value)
}

fn limit_exceeded(limit: u64) -> CompressionError {
    warn!(limit, "decompressed size limit reached");
    CompressionError::LimitExceeded { limit }
}
