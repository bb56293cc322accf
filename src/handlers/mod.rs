//! Handler interface invoked by the sandbox host
//!
//! A handler receives a parameter bag and a host-services object and always
//! returns a JSON-encoded result envelope. Failures travel inside the
//! envelope, never as a Rust error or a panic.

use crate::envelope::ResultEnvelope;
use crate::host::HostServices;
use crate::params::ParameterBag;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub mod add_number;

pub use add_number::{is_decimal_number, is_decimal_str, AddNumberHandler};

/// Returned when an envelope cannot be encoded
const ENCODE_FAILURE_JSON: &str =
    r#"{"success":false,"status":500,"error":{"message":"Failed to encode handler result."}}"#;

/// Request handler contract
pub trait Handler: Send + Sync {
    /// Static metadata the host publishes for this handler
    fn describe(&self) -> HandlerDescription;

    /// Validate the parameters and build the result envelope
    fn evaluate(&self, params: &ParameterBag, host: &dyn HostServices) -> ResultEnvelope;

    /// Run one invocation and encode the envelope as JSON
    fn handle(&self, params: &ParameterBag, host: &dyn HostServices) -> String {
        let description = self.describe();
        let invocation_id = Uuid::new_v4();
        let span = crate::invocation_span!(handler = %description.name, invocation_id = %invocation_id);
        let _guard = span.enter();

        let envelope = self.evaluate(params, host);
        tracing::debug!(
            success = envelope.is_success(),
            status = envelope.status(),
            "Invocation finished"
        );
        encode_envelope(&envelope)
    }
}

/// Handler metadata: accepted parameters with example values, and output columns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerDescription {
    pub name: String,
    pub description: String,
    pub accepted_params: Value,
    pub output_columns: Vec<String>,
}

/// Encode an envelope, falling back to a static failure envelope
pub fn encode_envelope(envelope: &ResultEnvelope) -> String {
    match envelope.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode result envelope");
            ENCODE_FAILURE_JSON.to_string()
        }
    }
}
