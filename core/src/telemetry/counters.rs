//! telemetry/counters.rs
//! Byte counters collected while compressing or decompressing one value.
use std::io::{self, Write};
use std::ops::AddAssign;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecCounters {
    /// JSON bytes (uncompressed side).
    pub bytes_plaintext: u64,
    /// gzip bytes (compressed side, header and footer included).
    pub bytes_compressed: u64,
}

impl CodecCounters {
    pub fn new(bytes_plaintext: u64, bytes_compressed: u64) -> Self {
        Self { bytes_plaintext, bytes_compressed }
    }

    /// `compressed / plaintext`, or 0.0 for an empty plaintext.
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_plaintext == 0 {
            return 0.0;
        }
        self.bytes_compressed as f64 / self.bytes_plaintext as f64
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_compressed += other.bytes_compressed;
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

/// Pass-through writer that counts accepted bytes.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn into_parts(self) -> (W, u64) {
        (self.inner, self.written)
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
