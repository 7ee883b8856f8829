//! storage/memory.rs
//! In-process `MultipartStore` for tests and local runs.
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::constants::{MAX_PART_NUMBER, MIN_PART_NUMBER, UPLOAD_ID_LEN};
use crate::storage::types::{CompletedPart, MultipartStore, StorageError};

#[derive(Debug)]
struct OpenUpload {
    bucket: String,
    key: String,
    presigned: BTreeSet<i32>,
}

#[derive(Debug, Default)]
struct Inner {
    open: HashMap<String, OpenUpload>,
    completed: HashMap<(String, String), Vec<CompletedPart>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while `upload_id` is neither completed nor aborted.
    pub fn is_open(&self, upload_id: &str) -> bool {
        self.lock().open.contains_key(upload_id)
    }

    /// Parts recorded for a completed object, if any.
    pub fn completed_parts(&self, bucket: &str, key: &str) -> Option<Vec<CompletedPart>> {
        self.lock()
            .completed
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The table has no invariants a panicking writer could leave half-applied.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_target(bucket: &str, key: &str) -> Result<(), String> {
    if bucket.is_empty() {
        return Err("bucket cannot be empty".into());
    }
    if key.is_empty() {
        return Err("key cannot be empty".into());
    }
    Ok(())
}

fn check_upload(inner: &Inner, bucket: &str, key: &str, upload_id: &str) -> Result<(), String> {
    check_target(bucket, key)?;
    match inner.open.get(upload_id) {
        None => Err(format!("no such upload: {:?}", upload_id)),
        Some(u) if u.bucket != bucket || u.key != key => {
            Err(format!("upload {} belongs to {}/{}", upload_id, u.bucket, u.key))
        }
        Some(_) => Ok(()),
    }
}

fn check_parts(parts: &[CompletedPart]) -> Result<(), String> {
    if parts.is_empty() {
        return Err("no parts to complete".into());
    }
    let mut prev = MIN_PART_NUMBER - 1;
    for p in parts {
        if !(MIN_PART_NUMBER..=MAX_PART_NUMBER).contains(&p.part_number) {
            return Err(format!("part number out of range: {}", p.part_number));
        }
        if p.part_number <= prev {
            return Err(format!("parts not in ascending order at {}", p.part_number));
        }
        if p.e_tag.is_empty() {
            return Err(format!("missing etag for part {}", p.part_number));
        }
        prev = p.part_number;
    }
    Ok(())
}

impl MultipartStore for MemoryStore {
    fn create_upload(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        check_target(bucket, key).map_err(|reason| StorageError::CreateUpload {
            bucket: bucket.into(),
            key: key.into(),
            reason,
        })?;

        let upload_id = hex::encode(rand::random::<[u8; UPLOAD_ID_LEN]>());
        self.lock().open.insert(
            upload_id.clone(),
            OpenUpload { bucket: bucket.into(), key: key.into(), presigned: BTreeSet::new() },
        );
        debug!(bucket, key, upload_id = %upload_id, "multipart upload created");
        Ok(upload_id)
    }

    fn presign_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        let err = |reason: String| StorageError::PresignPart {
            bucket: bucket.into(),
            key: key.into(),
            part_number,
            reason,
        };

        let mut inner = self.lock();
        check_upload(&inner, bucket, key, upload_id).map_err(err)?;
        if !(MIN_PART_NUMBER..=MAX_PART_NUMBER).contains(&part_number) {
            return Err(err(format!("part number out of range: {}", part_number)));
        }
        if ttl.is_zero() {
            return Err(err("ttl must be positive".into()));
        }

        if let Some(upload) = inner.open.get_mut(upload_id) {
            upload.presigned.insert(part_number);
        }
        Ok(format!(
            "memory://{}/{}?uploadId={}&partNumber={}&expires={}",
            bucket,
            key,
            upload_id,
            part_number,
            ttl.as_secs()
        ))
    }

    fn complete_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<(), StorageError> {
        let err = |reason: String| StorageError::CompleteUpload {
            bucket: bucket.into(),
            key: key.into(),
            reason,
        };

        let mut inner = self.lock();
        check_upload(&inner, bucket, key, upload_id).map_err(err)?;
        check_parts(parts).map_err(err)?;
        if let Some(upload) = inner.open.get(upload_id) {
            if let Some(p) = parts.iter().find(|p| !upload.presigned.contains(&p.part_number)) {
                return Err(err(format!("part {} was never presigned", p.part_number)));
            }
        }

        inner.open.remove(upload_id);
        inner.completed.insert((bucket.into(), key.into()), parts.to_vec());
        debug!(bucket, key, upload_id, parts = parts.len(), "multipart upload completed");
        Ok(())
    }

    fn abort_upload(&self, bucket: &str, key: &str, upload_id: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        check_upload(&inner, bucket, key, upload_id).map_err(|reason| StorageError::AbortUpload {
            bucket: bucket.into(),
            key: key.into(),
            reason,
        })?;

        inner.open.remove(upload_id);
        debug!(bucket, key, upload_id, "multipart upload aborted");
        Ok(())
    }
}
