//! compression/types.rs
//! Codec configuration and error types.
use std::io;

use flate2::Compression;
use thiserror::Error;

use crate::constants::{DEFAULT_LEVEL_GZIP, DEFAULT_MAX_DECOMPRESSED_SIZE, MAX_LEVEL_GZIP};
use crate::types::ErrorCode;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("data cannot be nil")]
    NilData,

    #[error("compressed data cannot be empty")]
    EmptyInput,

    #[error("output destination cannot be nil")]
    NilOutput,

    #[error("failed to encode JSON (type: {type_name}): {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to finalize compression: {0}")]
    Finalize(#[source] io::Error),

    #[error("failed to create decompressor: {0}")]
    Decompressor(#[source] io::Error),

    #[error("decompressed size exceeds limit: {limit} bytes")]
    LimitExceeded { limit: u64 },

    #[error("failed to decode JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to verify complete stream: {0}")]
    Verify(#[source] io::Error),
}

impl CompressionError {
    pub fn code(&self) -> ErrorCode {
        use CompressionError::*;
        match self {
            NilData | EmptyInput | NilOutput | LimitExceeded { .. } => ErrorCode::InvalidParams,
            Encode { .. } | Finalize(_) | Decompressor(_) | Decode(_) | Verify(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodecConfig {
    /// Deflate level.
    /// - `None` or a value above 9 → default level 6.
    pub level: Option<u32>,

    /// Upper bound on decompressed bytes.
    /// - `None` or `Some(v)` with `v <= 0` → 4 MiB default. Never "unlimited".
    pub max_uncompressed: Option<i64>,
}

impl CodecConfig {
    pub fn new(level: Option<u32>, max_uncompressed: Option<i64>) -> Self {
        Self { level, max_uncompressed }
    }

    pub fn compression(&self) -> Compression {
        match self.level {
            Some(lvl) if lvl <= MAX_LEVEL_GZIP => Compression::new(lvl),
            _ => Compression::new(DEFAULT_LEVEL_GZIP),
        }
    }

    pub fn limit(&self) -> u64 {
        effective_limit(self.max_uncompressed.unwrap_or(0))
    }
}

/// Resolve a caller-supplied limit; `<= 0` selects the process-wide default.
#[inline]
pub fn effective_limit(max_uncompressed: i64) -> u64 {
    if max_uncompressed <= 0 {
        DEFAULT_MAX_DECOMPRESSED_SIZE
    } else {
        max_uncompressed as u64
    }
}
