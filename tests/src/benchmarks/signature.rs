//! # Signature Verification Benchmarks
//!
//! Performance targets:
//! - personal_sign hash: < 10μs
//! - Address recovery: < 500μs
//! - Full verification through the service: < 1ms
//!
//! Message sizes span the short prompts users type up to the 10k-character
//! bodies the gateway still accepts.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use k256::ecdsa::SigningKey;
use std::time::Duration;
use ws_01_signature_verification::{
    hash_personal_message, recover_address, sign_personal_message, SignatureVerificationApi,
    SignatureVerificationService, VerifyPayload,
};

const MESSAGE_SIZES: [usize; 4] = [16, 256, 1024, 10_000];

fn signing_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

fn message_of(size: usize) -> String {
    "a".repeat(size)
}

fn signed(key: &SigningKey, message: &str) -> String {
    match sign_personal_message(key, message) {
        Ok(signature) => signature.to_hex(),
        Err(e) => panic!("benchmark fixture failed to sign: {e}"),
    }
}

pub fn bench_message_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("ws-01/personal_message_hash");

    for size in MESSAGE_SIZES {
        let message = message_of(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, msg| {
            b.iter(|| black_box(hash_personal_message(msg)))
        });
    }

    group.finish();
}

pub fn bench_address_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("ws-01/address_recovery");
    group.measurement_time(Duration::from_secs(10));

    let key = signing_key();
    let message = "Hello, Web3!";
    let signature = signed(&key, message);

    group.bench_function("recover_valid", |b| {
        b.iter(|| black_box(recover_address(message, &signature).is_ok()))
    });

    // Rejected before any curve arithmetic
    let high_s = {
        let mut bytes = match hex::decode(&signature[2..]) {
            Ok(bytes) => bytes,
            Err(e) => panic!("benchmark fixture is not hex: {e}"),
        };
        bytes[32..64].fill(0xff);
        format!("0x{}", hex::encode(bytes))
    };
    group.bench_function("reject_malformed_s", |b| {
        b.iter(|| black_box(recover_address(message, &high_s).is_err()))
    });

    group.finish();
}

pub fn bench_verification_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("ws-01/verification_service");
    group.measurement_time(Duration::from_secs(10));

    let service = SignatureVerificationService::default();
    let key = signing_key();

    for size in MESSAGE_SIZES {
        let message = message_of(size);
        let signature = signed(&key, &message);
        let payload = VerifyPayload::from_strings(Some(message), Some(signature));

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("verify", size), &payload, |b, payload| {
            b.iter(|| black_box(service.verify(payload)))
        });
    }

    let wrong_message = VerifyPayload::from_strings(
        Some("tampered".into()),
        Some(signed(&key, "original")),
    );
    group.bench_function("verify_mismatch", |b| {
        b.iter(|| black_box(service.verify(&wrong_message)))
    });

    group.finish();
}
