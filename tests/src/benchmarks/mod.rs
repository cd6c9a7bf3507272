//! # Benchmarks
//!
//! Benchmark bodies live here so `benches/` stays a thin criterion harness.

pub mod signature;
