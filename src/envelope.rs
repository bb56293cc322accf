//! Result envelope returned by handlers
//!
//! Every invocation produces exactly one envelope. The wire shape is:
//!
//! ```json
//! {"success": true,  "status": 200, "data":  {"result": 5}}
//! {"success": false, "status": 500, "error": {"message": "..."}}
//! ```
//!
//! The enum makes the "data xor error" rule a property of the type, and
//! deserialization rejects payloads that carry both groups or neither.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Status code attached to successful envelopes
pub const STATUS_OK: u16 = 200;

/// Status code attached to failure envelopes
pub const STATUS_FAILURE: u16 = 500;

/// Integral magnitudes below this are written without an exponent
const MAX_PLAIN_INTEGER: f64 = 1e21;

/// Handler output: success with data, or failure with an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub enum ResultEnvelope {
    Success { status: u16, data: SuccessData },
    Failure { status: u16, error: ErrorData },
}

/// Payload of a successful envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessData {
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

/// Payload of a failure envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    pub message: String,
}

impl ResultEnvelope {
    /// Create a success envelope carrying `result`
    pub fn success(result: f64) -> Self {
        Self::Success {
            status: STATUS_OK,
            data: SuccessData { result },
        }
    }

    /// Create a failure envelope carrying `message`
    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self::Failure {
            status: STATUS_FAILURE,
            error: ErrorData {
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    /// Result value of a success envelope
    pub fn result(&self) -> Option<f64> {
        match self {
            Self::Success { data, .. } => Some(data.result),
            Self::Failure { .. } => None,
        }
    }

    /// Error message of a failure envelope
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(&error.message),
        }
    }

    /// Encode as a compact JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Envelope decoding errors
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Envelope carries both data and error")]
    BothGroups,
    #[error("Envelope carries neither data nor error")]
    NoGroup,
    #[error("Envelope success flag is {success} but payload is {payload}")]
    FlagMismatch { success: bool, payload: &'static str },
}

/// Flat wire representation used by serde
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    success: bool,
    status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<SuccessData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorData>,
}

impl From<ResultEnvelope> for WireEnvelope {
    fn from(envelope: ResultEnvelope) -> Self {
        match envelope {
            ResultEnvelope::Success { status, data } => Self {
                success: true,
                status,
                data: Some(data),
                error: None,
            },
            ResultEnvelope::Failure { status, error } => Self {
                success: false,
                status,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<WireEnvelope> for ResultEnvelope {
    type Error = EnvelopeError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        match (wire.data, wire.error) {
            (Some(_), Some(_)) => Err(EnvelopeError::BothGroups),
            (None, None) => Err(EnvelopeError::NoGroup),
            (Some(data), None) if wire.success => Ok(Self::Success {
                status: wire.status,
                data,
            }),
            (None, Some(error)) if !wire.success => Ok(Self::Failure {
                status: wire.status,
                error,
            }),
            (Some(_), None) => Err(EnvelopeError::FlagMismatch {
                success: wire.success,
                payload: "data",
            }),
            (None, Some(_)) => Err(EnvelopeError::FlagMismatch {
                success: wire.success,
                payload: "error",
            }),
        }
    }
}

/// Write integral values below 1e21 as plain integers (`5`, `10000000000000000`)
///
/// Digits are the shortest round-trip form padded with zeros, the same text
/// `JSON.stringify` produces. Larger magnitudes and fractions use serde_json's
/// float formatting.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_PLAIN_INTEGER {
        if let Ok(magnitude) = format!("{}", value.abs()).parse::<u128>() {
            return if value.is_sign_negative() && magnitude != 0 {
                serializer.serialize_i128(-(magnitude as i128))
            } else {
                serializer.serialize_u128(magnitude)
            };
        }
    }
    serializer.serialize_f64(*value)
}
