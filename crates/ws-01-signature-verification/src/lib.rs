//! # Signature Verification Subsystem (WS-01)
//!
//! Recovers the signer of an Ethereum `personal_sign` signature and turns a
//! `{message, signature}` payload into a verification outcome.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic and payload validation, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **No Key Material**: Only public recovery happens here; signing helpers take
//!   a caller-owned key and never store it

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, hash_personal_message, keccak256, recover_address,
    recover_from_prehash, sign_personal_message, EcdsaCodec,
};
pub use domain::entities::{EthSignature, Hash, Rejection, VerificationOutcome, VerifyPayload};
pub use domain::errors::{CodecError, SignatureError};
pub use ports::inbound::SignatureVerificationApi;
pub use ports::outbound::SignatureCodec;
pub use service::SignatureVerificationService;
