use std::fmt;

use crate::{compression::CompressionError, storage::StorageError};

/// Error classification shared by every fallible operation in the crate.
///
/// - `InvalidParams`: caller misuse or caller-controlled data over a declared
///   limit. Recoverable and expected in normal operation.
/// - `InternalServerError`: stream corruption, unsupported shapes, checksum
///   failures. Indicates a bug, tampering, or a truncated transport.
/// - `Storage`: object-storage provider or transport failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidParams,
    InternalServerError,
    Storage,
}

impl ErrorCode {
    /// True for failures the caller caused and can fix.
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorCode::InvalidParams)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidParams => "invalid_params",
            ErrorCode::InternalServerError => "internal_server_error",
            ErrorCode::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error covering the codec and the storage capability.
/// - `From<T>` impls enable `?` across layers.
#[derive(Debug)]
pub enum CoreError {
    /// Compression/decompression error.
    Compression(CompressionError),

    /// Multipart storage error.
    Storage(StorageError),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Compression(e) => e.code(),
            CoreError::Storage(e) => e.code(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Compression(e) => write!(f, "compression error: {}", e),
            CoreError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Compression(e) => Some(e),
            CoreError::Storage(e) => Some(e),
        }
    }
}

impl From<CompressionError> for CoreError {
    fn from(e: CompressionError) -> Self {
        CoreError::Compression(e)
    }
}

impl From<StorageError> for CoreError {
    fn from(e: StorageError) -> Self {
        CoreError::Storage(e)
    }
}
