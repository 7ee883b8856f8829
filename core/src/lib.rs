//! compress-core
//!
//! Bounded gzip/JSON codec.
//! Values are streamed through a JSON encoder into gzip on the way in, and
//! decoded back under a hard cap on the decompressed size on the way out.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod compression;
pub mod telemetry;
pub mod storage;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compress, compress_with, decompress, decompress_with, CodecConfig, CompressionError,
    };
    pub use crate::storage::{CompletedPart, MemoryStore, MultipartStore, StorageError};
    pub use crate::types::{CoreError, ErrorCode};
}
