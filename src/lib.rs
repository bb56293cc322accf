//! nyan-handler
//!
//! A sandboxed request handler that validates a decimal-number parameter,
//! adds 2 to it and returns a JSON result envelope.
//!
//! # Overview
//!
//! - Parameter bag supplied by the host ([`params::ParameterBag`])
//! - Success/failure result envelope ([`envelope::ResultEnvelope`])
//! - Handler contract and the `addNumber` handler ([`handlers`])
//! - Optional, injected host capabilities ([`host::HostServices`])
//!
//! # Quick Start
//!
//! ```rust
//! use nyan_handler::handlers::{AddNumberHandler, Handler};
//! use nyan_handler::host::NoHost;
//! use nyan_handler::params::ParameterBag;
//!
//! let params = ParameterBag::from_json_str(r#"{"addNumber": "3"}"#).unwrap();
//! let output = AddNumberHandler::new().handle(&params, &NoHost);
//! assert_eq!(output, r#"{"success":true,"status":200,"data":{"result":5}}"#);
//!
//! let output = AddNumberHandler::new().handle(&ParameterBag::empty(), &NoHost);
//! assert!(output.starts_with(r#"{"success":false,"status":500"#));
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod host;
pub mod observability;
pub mod params;
pub mod testing;

pub use config::{ConfigError, HandlerConfig, NumberPolicy};
pub use envelope::ResultEnvelope;
pub use error::{HandlerError, HandlerResult};
pub use handlers::{AddNumberHandler, Handler, HandlerDescription};
pub use host::{Capability, HostError, HostServices, LocalHost, NoHost};
pub use params::{ParameterBag, ParamsError};
