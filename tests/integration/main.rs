//! Integration tests for the trigger probes.
//!
//! Run with: `cargo test --test integration`

mod skel_rewrite;
