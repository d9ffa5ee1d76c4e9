//! Fault-injection trigger probes with a shared harness shape.
//!
//! ## Scope
//! Each probe in this crate is a minimal program shape whose sole purpose is
//! to drive a known external defect into an observable failure state: open a
//! resource, run a fixed call sequence with argument values chosen to hit an
//! edge case, check each call for a failure sentinel, and abort with a fixed
//! diagnostic on the first failure. Probes share no state and no protocol;
//! each is its own closed pipeline.
//!
//! ## Key invariants
//! - A detected failure is immediately fatal: no recovery, no retry. Masking
//!   a failure would defeat the probe's purpose.
//! - Success paths release their resource exactly once; the abrupt-abort
//!   path deliberately releases nothing and leaves reclamation to process
//!   exit.
//! - Fixture paths are injected configuration values; the binaries supply
//!   the historical relative-path defaults.
//! - Untrusted metadata (archive sizes, pixel values) is recorded and
//!   driven, never trusted for allocation.
//!
//! ## Probes
//! - [`stream`]: pull decoded chunks from a compressed fixture until
//!   end-of-stream, accumulating them.
//! - [`zip`]: stat one archive entry by index and read its payload while its
//!   declared size lies.
//! - [`pixel`]: build a true-color/indexed image pair and fire a palette
//!   refit whose buffer sizing and buffer indexing disagree.
//!
//! ## Support
//! - [`probe`]: the shared harness shape (operation names, diagnostics,
//!   abort policy).
//! - [`skel`]: the extension-skeleton templater (generator driving + literal
//!   rewrite).
//! - [`fixture`]: deterministic fixture builders with benign contents and
//!   malformed metadata.

pub mod fixture;
pub mod pixel;
pub mod probe;
pub mod skel;
pub mod stream;
pub mod zip;

pub use probe::{Diagnostic, ProbeOp};
