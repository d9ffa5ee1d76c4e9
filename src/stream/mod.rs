//! Stream-read trigger.
//!
//! # Scope
//! Opens a compressed fixture by path, repeatedly pulls decoded chunks until
//! end-of-stream, concatenating them into an append-only accumulator, then
//! closes the resource. The point of the exercise is to drive the decode
//! path enough times to reach the library state under test; the accumulated
//! bytes are retained but otherwise unused.
//!
//! # Invariants
//! - The end-of-stream check is evaluated before every read attempt. A fresh
//!   handle reports not-at-EOF; EOF latches when a read returns zero bytes.
//! - On the success path the handle is closed exactly once.
//! - A read failure aborts WITHOUT closing the handle: it is deliberately
//!   leaked and the descriptor is reclaimed at process exit. Recovery or
//!   retry would mask the condition the probe exists to surface.

pub mod gzip;

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::mem;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::probe::ProbeOp;
use gzip::GzipStream;

/// Relative fixture path used when none is injected.
pub const DEFAULT_FIXTURE_PATH: &str = "trigger.gz";

/// Default decoded bytes requested per read attempt.
pub const DEFAULT_READ_LEN: usize = 8 * 1024;

/// Stream-read trigger configuration.
///
/// The fixture path is an injected resource locator so the trigger logic can
/// run against arbitrary fixture files; the binaries default it to
/// [`DEFAULT_FIXTURE_PATH`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamTriggerConfig {
    /// Path to a pre-existing compressed artifact.
    pub fixture_path: PathBuf,
    /// Decoded bytes requested per read attempt. Must be > 0.
    pub read_len: usize,
}

impl Default for StreamTriggerConfig {
    fn default() -> Self {
        Self {
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            read_len: DEFAULT_READ_LEN,
        }
    }
}

impl StreamTriggerConfig {
    pub fn validate(&self) -> Result<(), StreamConfigError> {
        if self.read_len == 0 {
            return Err(StreamConfigError::ReadLenZero);
        }
        if self.fixture_path.as_os_str().is_empty() {
            return Err(StreamConfigError::FixturePathEmpty);
        }
        Ok(())
    }
}

/// Validation error returned by `StreamTriggerConfig::validate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamConfigError {
    ReadLenZero,
    FixturePathEmpty,
}

impl fmt::Display for StreamConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadLenZero => write!(f, "read_len must be > 0"),
            Self::FixturePathEmpty => write!(f, "fixture_path must not be empty"),
        }
    }
}

impl std::error::Error for StreamConfigError {}

/// Failure sentinel taxonomy for the stream-read trigger.
///
/// Two-valued by design: the resource either could not be acquired or a
/// subsequent read returned the sentinel. Nothing else is distinguished.
#[derive(Debug)]
pub enum StreamTriggerError {
    /// The fixture could not be opened.
    Open(io::Error),
    /// A read attempt failed mid-stream (corrupt member, truncated body).
    Read(io::Error),
}

impl StreamTriggerError {
    /// Operation named by the probe diagnostic for this failure.
    #[inline]
    pub const fn op(&self) -> ProbeOp {
        match self {
            Self::Open(_) => ProbeOp::Open,
            Self::Read(_) => ProbeOp::Read,
        }
    }
}

impl fmt::Display for StreamTriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(err) => write!(f, "open failed: {err}"),
            Self::Read(err) => write!(f, "read failed: {err}"),
        }
    }
}

impl std::error::Error for StreamTriggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(err) | Self::Read(err) => Some(err),
        }
    }
}

/// Exclusive handle to the compressed fixture stream.
///
/// Open does not pre-validate the gzip header; a malformed member surfaces
/// as a read failure, keeping the open/read error split of the original
/// call sequence.
pub struct StreamHandle {
    stream: GzipStream<File>,
    eof: bool,
}

impl StreamHandle {
    pub fn open(path: &Path) -> Result<Self, StreamTriggerError> {
        let file = File::open(path).map_err(StreamTriggerError::Open)?;
        Ok(Self {
            stream: GzipStream::new(file),
            eof: false,
        })
    }

    /// End-of-stream state. False until a read has returned zero bytes.
    #[inline]
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Pull up to `buf.len()` decoded bytes. `buf` must be non-empty.
    ///
    /// A zero-byte result latches EOF.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, StreamTriggerError> {
        match self.stream.read(buf) {
            Ok(0) => {
                self.eof = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(err) => Err(StreamTriggerError::Read(err)),
        }
    }

    /// Compressed bytes consumed from the underlying file so far.
    #[inline]
    pub fn compressed_bytes(&self) -> u64 {
        self.stream.compressed_bytes()
    }

    /// Consume the handle. The underlying file is closed here and only here.
    #[inline]
    pub fn close(self) {}
}

/// Result of a completed stream-read trigger run.
#[derive(Debug)]
pub struct StreamReport {
    /// The accumulated decoded bytes, retained until process exit.
    pub decoded: Vec<u8>,
    /// Compressed bytes consumed from the fixture.
    pub compressed_bytes: u64,
    /// Number of read calls that returned data or EOF.
    pub reads: u32,
}

/// Drive the full open/read-until-eof/close sequence.
///
/// `config` must have passed `validate()`. On a read failure the handle is
/// leaked, not closed; see the module invariants.
pub fn drive(config: &StreamTriggerConfig) -> Result<StreamReport, StreamTriggerError> {
    let mut handle = StreamHandle::open(&config.fixture_path)?;

    let mut decoded = Vec::new();
    let mut chunk = vec![0u8; config.read_len];
    let mut reads = 0u32;

    while !handle.eof() {
        let n = match handle.read_chunk(&mut chunk) {
            Ok(n) => n,
            Err(err) => {
                // Abrupt-abort policy: the descriptor stays open until
                // process exit.
                mem::forget(handle);
                return Err(err);
            }
        };
        reads = reads.saturating_add(1);
        decoded.extend_from_slice(&chunk[..n]);
    }

    let compressed_bytes = handle.compressed_bytes();
    handle.close();

    Ok(StreamReport {
        decoded,
        compressed_bytes,
        reads,
    })
}
