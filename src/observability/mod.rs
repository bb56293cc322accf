//! Observability: structured logging setup and span macros

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

pub use logging::invocation_span;
