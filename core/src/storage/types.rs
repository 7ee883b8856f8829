//! storage/types.rs
//! Multipart upload interface and its error type.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ErrorCode;

/// One uploaded part, as needed to complete a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    /// 1-based part number.
    pub part_number: i32,
    /// ETag returned by the store for the uploaded part.
    pub e_tag: String,
}

impl CompletedPart {
    pub fn new(part_number: i32, e_tag: impl Into<String>) -> Self {
        Self { part_number, e_tag: e_tag.into() }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create multipart upload({bucket}/{key}): {reason}")]
    CreateUpload { bucket: String, key: String, reason: String },

    #[error("failed to presign upload part({bucket}/{key}) part:{part_number}: {reason}")]
    PresignPart { bucket: String, key: String, part_number: i32, reason: String },

    #[error("failed to complete multipart upload({bucket}/{key}): {reason}")]
    CompleteUpload { bucket: String, key: String, reason: String },

    #[error("failed to abort multipart upload({bucket}/{key}): {reason}")]
    AbortUpload { bucket: String, key: String, reason: String },
}

impl StorageError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Storage
    }
}

/// Multipart upload lifecycle: create → presign parts → complete or abort.
///
/// Every method reports provider or transport failures as `StorageError`.
pub trait MultipartStore: Send + Sync {
    /// Start an upload and return its id.
    fn create_upload(&self, bucket: &str, key: &str) -> Result<String, StorageError>;

    /// Issue a URL the client can PUT one part to, valid for `ttl`.
    fn presign_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        ttl: Duration,
    ) -> Result<String, StorageError>;

    fn complete_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<(), StorageError>;

    fn abort_upload(&self, bucket: &str, key: &str, upload_id: &str) -> Result<(), StorageError>;
}
