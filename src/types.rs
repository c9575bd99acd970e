// src/types.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// HTTP client binary a resolved template is handed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Curl,
    Httpie,
    Wget,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Curl => "curl",
            Backend::Httpie => "httpie",
            Backend::Wget => "wget",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curl" => Ok(Backend::Curl),
            "httpie" => Ok(Backend::Httpie),
            "wget" => Ok(Backend::Wget),
            other => Err(format!(
                "Unknown backend: {other} (expected \"curl\", \"httpie\" or \"wget\")"
            )),
        }
    }
}
