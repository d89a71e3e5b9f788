//! Application-service registration descriptor.
//!
//! Homeservers learn about this service from a registration file declaring
//! its URL and the tokens both sides authenticate with. The descriptor is
//! written as pretty-printed JSON, which is a strict subset of YAML and
//! therefore stays loadable by YAML-based registration readers.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::RngCore;
use serde::{Deserialize, Serialize};

const REGISTRATION_ID: &str = "matrix-as-webhook";

/// The application-service registration descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub url: String,
    pub as_token: String,
    pub hs_token: String,
    pub rate_limited: bool,
    pub namespaces: Namespaces,
}

/// Namespace claims; this service claims none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespaces {
    #[serde(default)]
    pub users: Vec<Namespace>,
    #[serde(default)]
    pub aliases: Vec<Namespace>,
    #[serde(default)]
    pub rooms: Vec<Namespace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub exclusive: bool,
    pub regex: String,
}

#[derive(Debug)]
pub enum RegistrationError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::Io(e) => write!(f, "failed to write registration: {}", e),
            RegistrationError::Serialize(e) => write!(f, "failed to serialize registration: {}", e),
        }
    }
}

impl std::error::Error for RegistrationError {}

impl Registration {
    /// Build a registration for the given public server URL.
    ///
    /// Tokens not supplied by the caller are generated fresh.
    pub fn generate(server_url: &str, as_token: Option<&str>) -> Self {
        let as_token = match as_token {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => generate_token(),
        };

        Self {
            id: REGISTRATION_ID.to_string(),
            url: server_url.to_string(),
            as_token,
            hs_token: generate_token(),
            rate_limited: false,
            namespaces: Namespaces::default(),
        }
    }

    /// Write the descriptor to disk, creating parent directories as needed.
    pub fn write_to_file(&self, path: &Path) -> Result<(), RegistrationError> {
        let data = serde_json::to_string_pretty(self).map_err(RegistrationError::Serialize)?;

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(RegistrationError::Io)?;
            }
        }

        fs::write(path, data).map_err(RegistrationError::Io)
    }
}

/// Random 32-byte token as a hex string.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
