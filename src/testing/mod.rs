//! Testing utilities
//!
//! Mock host services for exercising handlers without a live sandbox host.

pub mod mocks;

pub use mocks::*;
