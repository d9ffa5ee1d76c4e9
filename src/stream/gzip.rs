//! gzip sniff helper + streaming decoder wrapper.
//!
//! # Invariants
//! - The stream is read sequentially; no seeking.
//! - `MultiGzDecoder` treats concatenated members as a single stream.
//!
//! # Design Notes
//! - `CountedRead` provides compressed-byte accounting for the trigger
//!   report.
//! - Header validation is lazy: a malformed member surfaces as an error on
//!   the first read that touches it, never at open time.

use std::io::{self, Read};

use flate2::read::MultiGzDecoder;

/// gzip magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[inline(always)]
pub fn is_gzip_magic(header: &[u8]) -> bool {
    header.len() >= 2 && header[0] == GZIP_MAGIC[0] && header[1] == GZIP_MAGIC[1]
}

/// Read wrapper that counts compressed bytes consumed.
///
/// # Guarantees
/// - `bytes()` is monotonic and saturating.
pub struct CountedRead<R> {
    inner: R,
    bytes: u64,
}

impl<R> CountedRead<R> {
    #[inline]
    pub fn new(inner: R) -> Self {
        Self { inner, bytes: 0 }
    }

    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl<R: Read> Read for CountedRead<R> {
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(dst)?;
        self.bytes = self.bytes.saturating_add(n as u64);
        Ok(n)
    }
}

/// Streaming gzip decoder that supports concatenated members.
///
/// # Guarantees
/// - `compressed_bytes()` reports raw bytes pulled from the underlying
///   reader so far.
/// - `read()` yields decompressed bytes or an error on corruption.
pub struct GzipStream<R: Read> {
    dec: MultiGzDecoder<CountedRead<R>>,
}

impl<R: Read> GzipStream<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            dec: MultiGzDecoder::new(CountedRead::new(reader)),
        }
    }

    #[inline]
    pub fn compressed_bytes(&self) -> u64 {
        self.dec.get_ref().bytes()
    }
}

impl<R: Read> Read for GzipStream<R> {
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        self.dec.read(dst)
    }
}
