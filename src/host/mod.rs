//! Host services injected into handlers
//!
//! A sandbox host may expose file reads, outbound calls, command execution,
//! cookies, a small key/value store and the caller's address. None of these are guaranteed
//! to exist, so every method has a default that reports the capability as
//! unavailable. Handlers must produce the same result whichever host they
//! are given.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub mod local;

pub use local::LocalHost;

/// Optional capabilities a host can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    GetFile,
    GetRemote,
    PostRemote,
    HostExec,
    ClientIp,
    Cookies,
    ItemStore,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::GetFile => "getFile",
            Capability::GetRemote => "getAPI",
            Capability::PostRemote => "postRemote",
            Capability::HostExec => "hostExec",
            Capability::ClientIp => "getClientIP",
            Capability::Cookies => "cookies",
            Capability::ItemStore => "items",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability interface supplied by the sandbox host
pub trait HostServices: Send + Sync {
    /// Capabilities this host actually implements
    fn capabilities(&self) -> Vec<Capability> {
        Vec::new()
    }

    /// Read a file relative to the host's script directory
    fn get_file(&self, _path: &str) -> Result<String, HostError> {
        Err(HostError::Unavailable(Capability::GetFile))
    }

    /// GET a remote endpoint with basic-auth credentials and return the response text
    fn get_remote(&self, _url: &str, _username: &str, _password: &str) -> Result<String, HostError> {
        Err(HostError::Unavailable(Capability::GetRemote))
    }

    /// POST a JSON body to a remote endpoint and return the response text
    fn post_remote(&self, _url: &str, _body: &Value) -> Result<String, HostError> {
        Err(HostError::Unavailable(Capability::PostRemote))
    }

    /// Run a command on the host and return its output
    fn host_exec(&self, _command: &str) -> Result<String, HostError> {
        Err(HostError::Unavailable(Capability::HostExec))
    }

    fn get_client_ip(&self) -> Option<String> {
        None
    }

    fn get_cookie(&self, _name: &str) -> Option<String> {
        None
    }

    fn set_cookie(&self, _name: &str, _value: &str) -> Result<(), HostError> {
        Err(HostError::Unavailable(Capability::Cookies))
    }

    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), HostError> {
        Err(HostError::Unavailable(Capability::ItemStore))
    }
}

/// Host with no capabilities at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostServices for NoHost {}

/// Host capability errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host capability unavailable: {0}")]
    Unavailable(Capability),
    #[error("Path rejected: {0}")]
    PathRejected(String),
    #[error("Host I/O failed: {0}")]
    Io(String),
    #[error("File too large: {size} bytes (max: {max})")]
    TooLarge { size: u64, max: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_host_has_no_capabilities() {
        let host = NoHost;
        assert!(host.capabilities().is_empty());
        assert!(host.get_client_ip().is_none());
        assert!(host.get_cookie("session").is_none());
        assert!(host.get_item("key").is_none());
    }

    #[test]
    fn test_no_host_reports_unavailable() {
        let host = NoHost;
        assert!(matches!(
            host.get_file("data.txt"),
            Err(HostError::Unavailable(Capability::GetFile))
        ));
        assert!(matches!(
            host.get_remote("http://example.invalid", "user", "pass"),
            Err(HostError::Unavailable(Capability::GetRemote))
        ));
        assert!(matches!(
            host.post_remote("http://example.invalid", &json!({})),
            Err(HostError::Unavailable(Capability::PostRemote))
        ));
        assert!(matches!(
            host.host_exec("echo test"),
            Err(HostError::Unavailable(Capability::HostExec))
        ));
        assert!(matches!(
            host.set_cookie("a", "b"),
            Err(HostError::Unavailable(Capability::Cookies))
        ));
        assert!(matches!(
            host.set_item("a", "b"),
            Err(HostError::Unavailable(Capability::ItemStore))
        ));
    }

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::GetFile.to_string(), "getFile");
        assert_eq!(Capability::ClientIp.to_string(), "getClientIP");
        assert_eq!(Capability::GetRemote.to_string(), "getAPI");
        assert_eq!(Capability::HostExec.to_string(), "hostExec");
        assert_eq!(
            HostError::Unavailable(Capability::PostRemote).to_string(),
            "Host capability unavailable: postRemote"
        );
    }
}
