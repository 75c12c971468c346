use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The gateway's answer to a nonce query, before interpretation.
///
/// Gateways return the counter in several shapes: a bare JSON number, a
/// decimal string, or an object with a `nonce` field. [`RawNonce::parse`]
/// accepts exactly those; anything else (negative, fractional, missing) is
/// an error rather than a silent default to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawNonce(Value);

impl RawNonce {
    /// Wrap a raw gateway value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// A well-formed numeric answer.
    pub fn from_u64(nonce: u64) -> Self {
        Self(Value::from(nonce))
    }

    /// Interpret the raw value as a nonce.
    pub fn parse(&self) -> Result<u64, NonceParseError> {
        parse_value(&self.0).ok_or_else(|| NonceParseError {
            got: self.0.to_string(),
        })
    }
}

fn parse_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Object(map) => parse_value(map.get("nonce")?),
        _ => None,
    }
}

/// The gateway's nonce answer could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unparseable nonce response: {got}")]
pub struct NonceParseError {
    pub got: String,
}
