//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the verification service needs from the outside world.

use crate::domain::errors::CodecError;
use shared_types::Address;

/// Recovers the signer of a personal-message signature.
///
/// Production code uses [`crate::EcdsaCodec`]; tests swap in fakes to
/// exercise the unclassified-failure path.
pub trait SignatureCodec: Send + Sync {
    /// Recover the address that signed `message`.
    ///
    /// `Err(CodecError::Signature(_))` means the signature was understood to be
    /// bad. `Err(CodecError::Internal(_))` means something else broke.
    fn recover(&self, message: &str, signature: &str) -> Result<Address, CodecError>;
}
