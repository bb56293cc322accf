//! `addNumber` handler: adds 2 to a decimal-number parameter

use crate::config::{HandlerConfig, NumberPolicy};
use crate::envelope::ResultEnvelope;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Handler, HandlerDescription};
use crate::host::HostServices;
use crate::params::ParameterBag;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

/// Name of the single parameter this handler reads
pub const PARAM_NAME: &str = "addNumber";

/// Constant added to the parameter
pub const ADDEND: f64 = 2.0;

/// Fixed failure message for any missing or malformed `addNumber`
pub const INVALID_INPUT_MESSAGE: &str = "addNumber is a required field and must be numeric.";

// ASCII digits only; `\d` would also match other Unicode decimal digits.
static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("decimal pattern is valid"));

/// True when `value` is a string holding a non-negative decimal number
///
/// Native JSON numbers are not decimal strings and return false.
pub fn is_decimal_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if is_decimal_str(s))
}

/// True when `s` is one or more ASCII digits, optionally followed by `.` and
/// one or more ASCII digits, and parses to a finite f64
pub fn is_decimal_str(s: &str) -> bool {
    parse_decimal_str(s).is_some()
}

fn parse_decimal_str(s: &str) -> Option<f64> {
    if !DECIMAL_PATTERN.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Handler that adds 2 to a decimal-number `addNumber` parameter
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// invocations.
pub struct AddNumberHandler {
    name: String,
    number_policy: NumberPolicy,
}

impl Default for AddNumberHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl AddNumberHandler {
    /// Handler with the default id and `NumberPolicy::StringOnly`
    pub fn new() -> Self {
        Self::from_config(&HandlerConfig::default())
    }

    /// Take the handler id and number policy from the `[handler]` section
    pub fn from_config(config: &HandlerConfig) -> Self {
        Self {
            name: config.handler.id.clone(),
            number_policy: config.handler.number_policy,
        }
    }

    /// Override which `addNumber` value types are accepted
    pub fn with_number_policy(mut self, number_policy: NumberPolicy) -> Self {
        self.number_policy = number_policy;
        self
    }

    pub fn number_policy(&self) -> NumberPolicy {
        self.number_policy
    }

    /// Extract the operand under the configured policy (pure function)
    fn parse_operand(&self, value: Option<&Value>) -> HandlerResult<f64> {
        let parsed = match (value, self.number_policy) {
            (Some(Value::String(s)), _) => parse_decimal_str(s),
            (Some(Value::Number(n)), NumberPolicy::AllowNative) => {
                n.as_f64().filter(|n| n.is_finite() && *n >= 0.0)
            }
            _ => None,
        };

        parsed.ok_or_else(|| HandlerError::invalid_input(INVALID_INPUT_MESSAGE))
    }

    /// Host introspection; never affects the result
    fn log_diagnostics(&self, value: Option<&Value>, host: &dyn HostServices) {
        let capabilities: Vec<&'static str> =
            host.capabilities().iter().map(|c| c.name()).collect();
        debug!(
            add_number = ?value,
            capabilities = ?capabilities,
            client_ip = host.get_client_ip().as_deref().unwrap_or("unknown"),
            "Evaluating addNumber"
        );
    }
}

impl Handler for AddNumberHandler {
    fn describe(&self) -> HandlerDescription {
        HandlerDescription {
            name: self.name.clone(),
            description: "Adds 2 to the decimal number given as addNumber".to_string(),
            accepted_params: json!({ PARAM_NAME: 2 }),
            output_columns: vec!["result".to_string()],
        }
    }

    fn evaluate(&self, params: &ParameterBag, host: &dyn HostServices) -> ResultEnvelope {
        let value = params.get(PARAM_NAME);
        self.log_diagnostics(value, host);

        match self.parse_operand(value) {
            Ok(operand) => ResultEnvelope::success(ADDEND + operand),
            Err(e) => {
                debug!(error = %e, "Rejected addNumber");
                e.to_envelope()
            }
        }
    }
}
