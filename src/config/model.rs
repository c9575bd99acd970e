// src/config/model.rs

use serde::Deserialize;

use crate::types::Backend;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// timeout_seconds = 30
/// backend_timeout_seconds = 10
/// default_backend = "httpie"
/// ```
///
/// Every key is optional. This is the unvalidated form; convert it with
/// `ConfigFile::try_from` before use.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Shared deadline for all executables and the backend call.
    ///
    /// `None` means executables may run indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Upper bound on the backend call alone.
    #[serde(default = "default_backend_timeout_seconds")]
    pub backend_timeout_seconds: u64,

    /// Backend used when a template has no `[Backend]` section.
    #[serde(default)]
    pub default_backend: Backend,
}

fn default_backend_timeout_seconds() -> u64 {
    10
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            backend_timeout_seconds: default_backend_timeout_seconds(),
            default_backend: Backend::default(),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
}

impl ConfigFile {
    /// Build without running validation. Prefer `ConfigFile::try_from`.
    pub fn new_unchecked(config: ConfigSection) -> Self {
        Self { config }
    }
}
