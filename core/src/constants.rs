/// Default upper bound on the decompressed size (4 MiB).
/// Applied whenever a caller passes a limit `<= 0`.
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: u64 = 4 * 1024 * 1024;

/// gzip member magic (RFC 1952, ID1 ID2).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default deflate level (balanced).
pub const DEFAULT_LEVEL_GZIP: u32 = 6;
/// Highest level accepted by deflate.
pub const MAX_LEVEL_GZIP: u32 = 9;

/// Scratch buffer used while draining the tail of a stream.
pub const DRAIN_BUF_SIZE: usize = 8 * 1024;

/// Multipart part numbers are 1-based and capped (S3-compatible stores).
pub const MIN_PART_NUMBER: i32 = 1;
pub const MAX_PART_NUMBER: i32 = 10_000;

/// Random bytes behind an in-memory upload id.
pub const UPLOAD_ID_LEN: usize = 16;
