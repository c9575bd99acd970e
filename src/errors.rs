// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::template::TemplateFatals;

#[derive(Error, Debug)]
pub enum ReqtmplError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    Template(TemplateFatals),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{message}")]
    Backend {
        message: String,
        exit_code: Option<i32>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReqtmplError {
    /// Process exit code for this error: the backend's own code when it
    /// reported one, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReqtmplError::Backend {
                exit_code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ReqtmplError>;
