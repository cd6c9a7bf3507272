//! # Domain Entities
//!
//! Core data structures for signature verification.

use super::errors::SignatureError;
use serde_json::{Map, Value};
use shared_types::{SignatureRequest, VerificationResult};

/// 32-byte digest (keccak256 output)
pub type Hash = [u8; 32];

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve, as produced by `personal_sign`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, 28, or EIP-155 style >= 35)
    pub v: u8,
}

impl EthSignature {
    /// Parse a `0x`-prefixed hex signature.
    ///
    /// Accepts 65 bytes `r || s || v` or 64-byte EIP-2098 compact
    /// `r || (y_parity << 255 | s)`.
    pub fn from_hex(text: &str) -> Result<Self, SignatureError> {
        let digits = text
            .strip_prefix("0x")
            .ok_or_else(|| SignatureError::InvalidEncoding("missing 0x prefix".into()))?;

        let bytes =
            hex::decode(digits).map_err(|e| SignatureError::InvalidEncoding(e.to_string()))?;

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];

        match bytes.len() {
            65 => {
                r.copy_from_slice(&bytes[..32]);
                s.copy_from_slice(&bytes[32..64]);
                Ok(Self { r, s, v: bytes[64] })
            }
            64 => {
                r.copy_from_slice(&bytes[..32]);
                s.copy_from_slice(&bytes[32..]);
                let y_parity = s[0] >> 7;
                s[0] &= 0x7f;
                Ok(Self {
                    r,
                    s,
                    v: 27 + y_parity,
                })
            }
            n => Err(SignatureError::InvalidLength(n)),
        }
    }

    /// 65-byte `r || s || v` encoding.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// `0x`-prefixed hex of [`Self::to_bytes`].
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

// =============================================================================
// Verification Request/Outcome Types
// =============================================================================

/// Loosely-typed verification payload, exactly as the caller sent it.
///
/// Fields stay as raw JSON values so that presence, truthiness and type can be
/// checked in the documented order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerifyPayload {
    pub message: Option<Value>,
    pub signature: Option<Value>,
}

impl VerifyPayload {
    /// Build from a decoded JSON body. Non-object bodies carry no fields.
    pub fn from_json(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            message: map.get("message").cloned(),
            signature: map.get("signature").cloned(),
        }
    }

    /// Build from already-split string fields (form bodies).
    pub fn from_strings(message: Option<String>, signature: Option<String>) -> Self {
        Self {
            message: message.map(Value::String),
            signature: signature.map(Value::String),
        }
    }

    /// Apply the presence check, then the type check.
    ///
    /// An empty string counts as missing, so `message: ""` is rejected here.
    pub fn validate(&self) -> Result<SignatureRequest, Rejection> {
        if !is_truthy(self.message.as_ref()) || !is_truthy(self.signature.as_ref()) {
            return Err(Rejection::MissingFields);
        }

        match (&self.message, &self.signature) {
            (Some(Value::String(message)), Some(Value::String(signature))) => {
                Ok(SignatureRequest::new(message.clone(), signature.clone()))
            }
            _ => Err(Rejection::InvalidFieldTypes),
        }
    }
}

/// JSON truthiness: absent, `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Why a payload never reached the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// `message` or `signature` absent or falsy
    MissingFields,
    /// `message` or `signature` present but not a string
    InvalidFieldTypes,
}

/// Result of running a payload through the verification service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The codec ran; the result may be valid or invalid
    Completed(VerificationResult),
    /// The payload failed validation
    Rejected(Rejection),
    /// Something unexpected went wrong
    Failed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_hex_full_signature() {
        let text = "0x".to_string() + &"ab".repeat(32) + &"cd".repeat(32) + "1b";
        let sig = EthSignature::from_hex(&text).unwrap();
        assert_eq!(sig.r, [0xab; 32]);
        assert_eq!(sig.s, [0xcd; 32]);
        assert_eq!(sig.v, 27);
        assert_eq!(sig.to_hex(), text);
    }

    #[test]
    fn test_from_hex_compact_signature() {
        let mut ys = [0x11u8; 32];
        ys[0] |= 0x80;
        let text = format!("0x{}{}", "22".repeat(32), hex::encode(ys));

        let sig = EthSignature::from_hex(&text).unwrap();
        assert_eq!(sig.v, 28);
        assert_eq!(sig.s[0], 0x11);
        assert_eq!(sig.r, [0x22; 32]);
    }

    #[test]
    fn test_from_hex_requires_prefix() {
        let text = "ab".repeat(65);
        assert!(matches!(
            EthSignature::from_hex(&text),
            Err(SignatureError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            EthSignature::from_hex("0xinvalid_signature"),
            Err(SignatureError::InvalidEncoding(_))
        ));
        assert!(matches!(
            EthSignature::from_hex("0x123"),
            Err(SignatureError::InvalidEncoding(_))
        ));
        assert_eq!(
            EthSignature::from_hex("0xabcd"),
            Err(SignatureError::InvalidLength(2))
        );
    }

    #[test]
    fn test_payload_missing_fields() {
        let cases = [
            json!({ "signature": "0x123" }),
            json!({ "message": "test message" }),
            json!({ "message": "", "signature": "0x123" }),
            json!({ "message": "test message", "signature": "" }),
            json!({ "message": null, "signature": "0x123" }),
            json!({ "message": 0, "signature": "0x123" }),
            json!({ "message": false, "signature": "0x123" }),
            json!([]),
            json!(null),
        ];

        for body in cases {
            let payload = VerifyPayload::from_json(&body);
            assert_eq!(
                payload.validate(),
                Err(Rejection::MissingFields),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_payload_invalid_types() {
        let cases = [
            json!({ "message": 123, "signature": "0x123" }),
            json!({ "message": "test message", "signature": 123 }),
            json!({ "message": true, "signature": "0x123" }),
            json!({ "message": ["a"], "signature": "0x123" }),
            json!({ "message": "m", "signature": { "r": 1 } }),
        ];

        for body in cases {
            let payload = VerifyPayload::from_json(&body);
            assert_eq!(
                payload.validate(),
                Err(Rejection::InvalidFieldTypes),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_payload_valid_preserves_message() {
        let message = "  padded\nline\t🚀  ";
        let payload = VerifyPayload::from_json(&json!({
            "message": message,
            "signature": "0xdead",
            "extra": 1,
        }));

        let request = payload.validate().unwrap();
        assert_eq!(request.message, message);
        assert_eq!(request.signature, "0xdead");
    }

    #[test]
    fn test_payload_from_strings() {
        let payload = VerifyPayload::from_strings(Some("m".into()), None);
        assert_eq!(payload.validate(), Err(Rejection::MissingFields));

        let payload = VerifyPayload::from_strings(Some("m".into()), Some("0x1".into()));
        assert!(payload.validate().is_ok());
    }
}
