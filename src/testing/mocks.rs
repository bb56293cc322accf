//! Mock host services for testing
//!
//! `MockHost` advertises every capability, serves canned responses and
//! records each call, so tests can assert what a handler touched.

use crate::host::{Capability, HostError, HostServices};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A single recorded host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Capabilities,
    GetFile(String),
    GetRemote(String),
    PostRemote(String),
    HostExec(String),
    GetClientIp,
    GetCookie(String),
    SetCookie(String, String),
    GetItem(String),
    SetItem(String, String),
}

#[derive(Debug, Default)]
pub struct MockHost {
    pub files: HashMap<String, String>,
    pub remote_response: Option<String>,
    pub exec_output: Option<String>,
    pub client_ip: Option<String>,
    pub calls: Arc<Mutex<Vec<HostCall>>>,
    store: Mutex<HashMap<String, String>>,
    cookies: Mutex<HashMap<String, String>>,
    pub should_fail: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose fallible calls all fail
    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_client_ip(mut self, ip: &str) -> Self {
        self.client_ip = Some(ip.to_string());
        self
    }

    pub fn with_remote_response(mut self, body: &str) -> Self {
        self.remote_response = Some(body.to_string());
        self
    }

    pub fn with_exec_output(mut self, output: &str) -> Self {
        self.exec_output = Some(output.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<HostCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear_history(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: HostCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn fail_if_requested(&self) -> Result<(), HostError> {
        if self.should_fail {
            return Err(HostError::Io("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl HostServices for MockHost {
    fn capabilities(&self) -> Vec<Capability> {
        self.record(HostCall::Capabilities);
        vec![
            Capability::GetFile,
            Capability::GetRemote,
            Capability::PostRemote,
            Capability::HostExec,
            Capability::ClientIp,
            Capability::Cookies,
            Capability::ItemStore,
        ]
    }

    fn get_file(&self, path: &str) -> Result<String, HostError> {
        self.record(HostCall::GetFile(path.to_string()));
        self.fail_if_requested()?;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::Io(format!("File not found: {path}")))
    }

    fn get_remote(&self, url: &str, _username: &str, _password: &str) -> Result<String, HostError> {
        self.record(HostCall::GetRemote(url.to_string()));
        self.fail_if_requested()?;
        Ok(self.remote_response.clone().unwrap_or_default())
    }

    fn post_remote(&self, url: &str, _body: &Value) -> Result<String, HostError> {
        self.record(HostCall::PostRemote(url.to_string()));
        self.fail_if_requested()?;
        Ok(self.remote_response.clone().unwrap_or_default())
    }

    fn host_exec(&self, command: &str) -> Result<String, HostError> {
        self.record(HostCall::HostExec(command.to_string()));
        self.fail_if_requested()?;
        Ok(self.exec_output.clone().unwrap_or_default())
    }

    fn get_client_ip(&self) -> Option<String> {
        self.record(HostCall::GetClientIp);
        self.client_ip.clone()
    }

    fn get_cookie(&self, name: &str) -> Option<String> {
        self.record(HostCall::GetCookie(name.to_string()));
        self.cookies.lock().ok()?.get(name).cloned()
    }

    fn set_cookie(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.record(HostCall::SetCookie(name.to_string(), value.to_string()));
        self.fail_if_requested()?;
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.record(HostCall::GetItem(key.to_string()));
        self.store.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.record(HostCall::SetItem(key.to_string(), value.to_string()));
        self.fail_if_requested()?;
        if let Ok(mut store) = self.store.lock() {
            store.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
