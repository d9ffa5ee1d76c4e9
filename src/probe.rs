//! Shared harness shape for fault-injection probes.
//!
//! # Scope
//! Every trigger in this crate is the same small machine: open a resource,
//! drive a fixed call sequence, check each call for a failure sentinel, and
//! abort with a fixed diagnostic on the first failure. This module holds the
//! pieces that machine shares: the operation names, the diagnostic format,
//! and the abort policy.
//!
//! # Invariants
//! - `ProbeOp` is `#[repr(u8)]` with stable discriminants; new variants must
//!   be appended.
//! - Diagnostics are fixed literal strings of the form `ERROR: <op>()`.
//! - A probe failure is fatal. There is no recovery and no retry; masking a
//!   failure would defeat the probe's purpose.

use core::fmt;

/// Exit code for a detected probe failure.
///
/// Failure kinds are not distinguished by code; the diagnostic names the
/// failed operation.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit code for invalid arguments or configuration.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Operation that a probe diagnostic names.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeOp {
    /// Resource acquisition (file open, container locate).
    Open = 0,
    /// Pulling bytes out of an acquired resource.
    Read = 1,
    /// Locating an archive entry by index.
    Stat = 2,
    /// The pixel-buffer transformation call.
    ColorMatch = 3,
    /// Running the external skeleton generator.
    Generate = 4,
    /// Rewriting a generated skeleton file.
    Rewrite = 5,
}

impl ProbeOp {
    pub const COUNT: usize = 6;

    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Read => "read",
            Self::Stat => "stat",
            Self::ColorMatch => "color_match",
            Self::Generate => "generate",
            Self::Rewrite => "rewrite",
        }
    }
}

/// The fixed per-operation failure diagnostic.
///
/// Renders as `ERROR: <op>()`, byte-for-byte what the trigger binaries print
/// before terminating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic(pub ProbeOp);

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {}()", self.0.name())
    }
}

/// Print the failure diagnostic for `op` and terminate the process.
///
/// Used by the trigger binaries only; library code returns errors and lets
/// the caller decide.
pub fn abort(op: ProbeOp) -> ! {
    eprintln!("{}", Diagnostic(op));
    std::process::exit(FAILURE_EXIT_CODE)
}
