//! # Verification Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | personal_sign hash | < 10μs |
//! | Address recovery | < 500μs |
//! | Full verification (parse + recover + compare) | < 1ms |

use criterion::{criterion_group, criterion_main};
use ws_tests::benchmarks::signature;

criterion_group!(
    benches,
    signature::bench_message_hash,
    signature::bench_address_recovery,
    signature::bench_verification_service,
);
criterion_main!(benches);
