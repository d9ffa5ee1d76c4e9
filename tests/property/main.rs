//! Property-based tests for the pixel-buffer trigger.
//!
//! Run with: `cargo test --test property`
