//! storage/mod.rs
//! Multipart upload capability consumed by upload orchestration.
//!
//! Only the interface and an in-memory store live here; network providers
//! implement `MultipartStore` elsewhere.

pub mod memory;
pub mod types;

pub use memory::*;
pub use types::*;
