//! compression/bounded.rs
//! Byte-budget reader used to cap decompressed output.
//!
//! The budget is shared by every read made through the wrapper, so a decoder
//! and the drain that follows it draw from the same counter.
use std::cmp;
use std::io::{self, Read};

use crate::constants::DRAIN_BUF_SIZE;

/// Outcome of a single bounded read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundedRead {
    /// `n` bytes were produced and charged against the budget.
    Data(usize),
    /// The underlying stream reached its true end.
    End,
    /// The budget is spent and the underlying stream still has bytes.
    LimitReached,
}

#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    limit: u64,
    remaining: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self { inner, limit, remaining: limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Bytes charged against the budget so far.
    pub fn consumed(&self) -> u64 {
        self.limit - self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Read at most `min(buf.len(), remaining)` bytes.
    ///
    /// Once the budget is spent, a one-byte probe of the inner stream decides
    /// between `End` and `LimitReached`. The probed byte is never handed out.
    /// An empty `buf` yields `Data(0)` without touching the inner stream.
    pub fn read_bounded(&mut self, buf: &mut [u8]) -> io::Result<BoundedRead> {
        if self.remaining == 0 {
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe)? {
                0 => Ok(BoundedRead::End),
                _ => Ok(BoundedRead::LimitReached),
            };
        }
        if buf.is_empty() {
            return Ok(BoundedRead::Data(0));
        }

        let max = cmp::min(buf.len() as u64, self.remaining) as usize;
        match self.inner.read(&mut buf[..max])? {
            0 => Ok(BoundedRead::End),
            n => {
                self.remaining -= n as u64;
                Ok(BoundedRead::Data(n))
            }
        }
    }

    /// Read and discard until the stream ends or the budget runs out.
    ///
    /// Returns the terminal outcome: `End` or `LimitReached`.
    pub fn drain(&mut self) -> io::Result<BoundedRead> {
        let mut scratch = [0u8; DRAIN_BUF_SIZE];
        loop {
            match self.read_bounded(&mut scratch) {
                Ok(BoundedRead::Data(_)) => continue,
                Ok(terminal) => return Ok(terminal),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Plain `Read` view over the same budget.
///
/// A spent budget reads as EOF (`Ok(0)`); callers tell it apart from a true
/// end with [`BoundedReader::is_exhausted`].
impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = cmp::min(buf.len() as u64, self.remaining) as usize;
        let n = self.inner.read(&mut buf[..max])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}
