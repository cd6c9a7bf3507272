//! Route handlers for the verification gateway.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`root`] |
//! | `GET /health` | [`health_check`] |
//! | `POST /verify-signature` | [`verify_signature`] |
//! | anything else | [`not_found`] |

use crate::domain::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, HeaderMap, Method, Uri};
use axum::{Form, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use shared_types::VerificationResult;
use std::sync::Arc;
use tracing::error;
use ws_01_signature_verification::{SignatureVerificationApi, VerificationOutcome, VerifyPayload};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn SignatureVerificationApi>,
}

/// How a request body should be decoded, by `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        else {
            return Self::Other;
        };

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

/// Fold urlencoded pairs into a JSON object, nesting the way extended
/// form parsers do.
///
/// A plain key seen once is a string. Repeating it yields an array;
/// `key[]` and `key[0]` push onto an array; `key[name]` builds an object.
fn form_to_json(pairs: Vec<(String, String)>) -> Value {
    let mut fields = Map::new();
    for (key, value) in pairs {
        let (name, index) = split_form_key(&key);
        let slot = fields.entry(name.to_string()).or_insert(Value::Null);
        insert_form_value(slot, index, value);
    }
    Value::Object(fields)
}

/// `"a[b]c"` → `("a", Some("b"))`, `"a"` → `("a", None)`.
fn split_form_key(key: &str) -> (&str, Option<&str>) {
    match key.find('[') {
        Some(open) if open > 0 => {
            let rest = &key[open + 1..];
            let index = rest.find(']').map_or(rest, |close| &rest[..close]);
            (&key[..open], Some(index))
        }
        _ => (key, None),
    }
}

fn insert_form_value(slot: &mut Value, index: Option<&str>, value: String) {
    let value = Value::String(value);
    let is_array_index =
        index.map_or(true, |i| i.is_empty() || i.bytes().all(|b| b.is_ascii_digit()));

    match (slot.take(), index) {
        (Value::Null, None) => *slot = value,
        (Value::Null, Some(_)) if is_array_index => *slot = Value::Array(vec![value]),
        (Value::Null, Some(name)) => {
            *slot = Value::Object(Map::from_iter([(name.to_string(), value)]))
        }
        (Value::Object(mut map), index) => {
            let name = index
                .filter(|i| !i.is_empty())
                .map_or_else(|| map.len().to_string(), str::to_string);
            map.insert(name, value);
            *slot = Value::Object(map);
        }
        (Value::Array(mut items), _) if is_array_index => {
            items.push(value);
            *slot = Value::Array(items);
        }
        (existing, _) if is_array_index => *slot = Value::Array(vec![existing, value]),
        (existing, index) => {
            let mut map: Map<String, Value> = match existing {
                Value::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item))
                    .collect(),
                other => Map::from_iter([("0".to_string(), other)]),
            };
            map.insert(index.unwrap_or_default().to_string(), value);
            *slot = Value::Object(map);
        }
    }
}

/// Decode the body into a payload without judging its fields.
async fn decode_payload(request: Request) -> ApiResult<VerifyPayload> {
    match BodyKind::of(request.headers()) {
        BodyKind::Json => {
            let bytes = Bytes::from_request(request, &()).await?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(VerifyPayload::default());
            }
            let value: Value = serde_json::from_slice(&bytes)?;
            Ok(VerifyPayload::from_json(&value))
        }
        BodyKind::Form => {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &()).await?;
            Ok(VerifyPayload::from_json(&form_to_json(pairs)))
        }
        BodyKind::Other => Ok(VerifyPayload::default()),
    }
}

/// `POST /verify-signature`
pub async fn verify_signature(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<VerificationResult>> {
    let payload = decode_payload(request).await?;

    match state.verifier.verify(&payload) {
        VerificationOutcome::Completed(result) => Ok(Json(result)),
        VerificationOutcome::Rejected(rejection) => Err(rejection.into()),
        VerificationOutcome::Failed { reason } => {
            error!(%reason, "Signature verification failed unexpectedly");
            Err(ApiError::internal())
        }
    }
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Signature verification gateway is running" }))
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Fallback for unknown routes and unsupported methods.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(method.as_str(), uri.path())
}
