//! # Signature Verification Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for the hot paths
//! │   └── signature.rs
//! │
//! └── integration/      # Wallet → gateway → history, over real HTTP
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ws-tests
//! cargo test -p ws-tests integration::
//!
//! # Benchmarks
//! cargo bench -p ws-tests
//! ```

pub mod benchmarks;
pub mod integration;
