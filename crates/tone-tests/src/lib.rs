//! Integration tests for TONE-RS crates.
//!
//! End-to-end scenarios that cross crate boundaries: statistics feeding
//! operators, whole-pipeline conversions, and file round trips through
//! tone-io.
