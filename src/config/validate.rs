// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ReqtmplError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ReqtmplError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(timeout) = cfg.config.timeout_seconds {
        ensure_positive("timeout_seconds", timeout)?;
    }
    ensure_positive("backend_timeout_seconds", cfg.config.backend_timeout_seconds)?;
    Ok(())
}

/// Shared with the CLI so `--timeout 0` is rejected the same way.
pub(crate) fn ensure_positive(key: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ReqtmplError::ConfigError(format!(
            "[config].{key} must be >= 1 (got 0)"
        )));
    }
    Ok(())
}
