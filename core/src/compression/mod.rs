//! compression/mod.rs
//! Bounded gzip/JSON codec.
//!
//! - `compress` streams a value through a JSON encoder straight into gzip.
//! - `decompress` decodes under a byte budget and verifies the gzip footer
//!   against that same budget before handing the value back.

pub mod bounded;
pub mod codec;
pub mod types;

pub use bounded::*;
pub use codec::*;
pub use types::*;
