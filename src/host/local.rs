//! Local host services for the CLI and tests
//!
//! Provides file reads rooted at a base directory with a size limit, an
//! in-memory item store, in-memory cookies and a fixed client address.
//! Outbound calls and command execution are not provided.

use crate::config::HostSection;
use crate::host::{Capability, HostError, HostServices};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

pub struct LocalHost {
    base_dir: PathBuf,
    max_file_size: u64,
    client_ip: Option<String>,
    items: Mutex<HashMap<String, String>>,
    cookies: Mutex<HashMap<String, String>>,
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::from_config(&HostSection::default())
    }
}

impl LocalHost {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_file_size: 1024 * 1024, // 1MB default
            client_ip: None,
            items: Mutex::new(HashMap::new()),
            cookies: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &HostSection) -> Self {
        Self::new(config.base_dir.clone())
            .with_max_file_size(config.max_file_size)
            .with_client_ip(config.client_ip.clone())
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_client_ip(mut self, client_ip: Option<String>) -> Self {
        self.client_ip = client_ip;
        self
    }

    /// Only plain relative paths below the base directory are readable (pure function)
    fn validate_relative_path(path: &Path) -> Result<(), HostError> {
        if path.as_os_str().is_empty() {
            return Err(HostError::PathRejected("empty path".to_string()));
        }

        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(HostError::PathRejected(path.display().to_string()));
        }

        Ok(())
    }

    /// Check file size constraints (pure function)
    fn check_file_size(file_size: u64, max_size: u64) -> Result<(), HostError> {
        if file_size > max_size {
            return Err(HostError::TooLarge {
                size: file_size,
                max: max_size,
            });
        }
        Ok(())
    }
}

impl HostServices for LocalHost {
    fn capabilities(&self) -> Vec<Capability> {
        let mut capabilities = vec![Capability::GetFile, Capability::Cookies, Capability::ItemStore];
        if self.client_ip.is_some() {
            capabilities.push(Capability::ClientIp);
        }
        capabilities
    }

    fn get_file(&self, path: &str) -> Result<String, HostError> {
        let relative = Path::new(path);
        Self::validate_relative_path(relative)?;

        // Symlinks inside the base directory must not resolve outside it
        let base_dir =
            fs::canonicalize(&self.base_dir).map_err(|e| HostError::Io(e.to_string()))?;
        let full_path = fs::canonicalize(self.base_dir.join(relative))
            .map_err(|e| HostError::Io(e.to_string()))?;
        if !full_path.starts_with(&base_dir) {
            return Err(HostError::PathRejected(path.to_string()));
        }

        let metadata = fs::metadata(&full_path).map_err(|e| HostError::Io(e.to_string()))?;
        if !metadata.is_file() {
            return Err(HostError::Io(format!(
                "Path is not a file: {}",
                full_path.display()
            )));
        }
        Self::check_file_size(metadata.len(), self.max_file_size)?;

        fs::read_to_string(&full_path).map_err(|e| HostError::Io(e.to_string()))
    }

    fn get_client_ip(&self) -> Option<String> {
        self.client_ip.clone()
    }

    fn get_cookie(&self, name: &str) -> Option<String> {
        self.cookies.lock().ok()?.get(name).cloned()
    }

    fn set_cookie(&self, name: &str, value: &str) -> Result<(), HostError> {
        let mut cookies = self
            .cookies
            .lock()
            .map_err(|_| HostError::Io("cookie store poisoned".to_string()))?;
        cookies.insert(name.to_string(), value.to_string());
        tracing::debug!(cookie = name, "Set cookie");
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| HostError::Io("item store poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
