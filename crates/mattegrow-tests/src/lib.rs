//! Integration tests for the mattegrow crates.
//!
//! This crate contains end-to-end tests that drive the full filter
//! pipeline through an in-memory source: brute-force reference
//! comparisons, multi-threaded scheduling, and frame lifecycle behavior.
