//! # Shared Types Crate
//!
//! Wire contract between the verification gateway and its clients.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: request and response bodies of
//!   `POST /verify-signature` are defined here and nowhere else.
//! - **Verbatim Echo**: `originalMessage` is never trimmed or normalized.
//! - **Case-Insensitive Addresses**: signers are emitted in EIP-55 form, but
//!   consumers must compare them case-insensitively.

pub mod address;
pub mod display;
pub mod entities;
pub mod errors;

pub use address::{addresses_match, Address};
pub use display::shorten;
pub use entities::*;
pub use errors::*;
