//! Configuration Management
//!
//! Persistent defaults for the connection settings plus resolution of the
//! effective settings from command line, environment and config file.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which catalog URL to use for a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    #[default]
    #[value(alias = "publicURL")]
    Public,
    #[value(alias = "internalURL")]
    Internal,
    #[value(alias = "adminURL")]
    Admin,
}

impl EndpointType {
    /// Catalog key, as Keystone v2 spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "publicURL",
            Self::Internal => "internalURL",
            Self::Admin => "adminURL",
        }
    }
}

/// Everything needed to authenticate and locate services
#[derive(Clone)]
pub struct ConnectionSettings {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub tenant_name: String,
    pub endpoint_type: EndpointType,
    pub region_name: Option<String>,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant_name", &self.tenant_name)
            .field("endpoint_type", &self.endpoint_type)
            .field("region_name", &self.region_name)
            .finish()
    }
}

/// Values given on the command line or through `OS_*` variables
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub auth_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tenant_name: Option<String>,
    pub endpoint_type: Option<EndpointType>,
    pub region_name: Option<String>,
}

/// User configuration
///
/// Never holds the password.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub endpoint_type: Option<EndpointType>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("heat-resource-fetcher").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))?;

        Ok(())
    }

    /// Remember the non-secret parts of the effective settings
    pub fn remember(&mut self, settings: &ConnectionSettings) {
        self.auth_url = Some(settings.auth_url.clone());
        self.username = Some(settings.username.clone());
        self.tenant_name = Some(settings.tenant_name.clone());
        self.region_name = settings.region_name.clone();
        self.endpoint_type = Some(settings.endpoint_type);
    }

    /// Get effective connection settings (CLI/env > config file)
    pub fn resolve(&self, overrides: ConnectionOverrides) -> Result<ConnectionSettings> {
        let auth_url = pick(overrides.auth_url, &self.auth_url)
            .ok_or_else(|| missing("identity endpoint", "--os-auth-url", "OS_AUTH_URL"))?;
        validate_auth_url(&auth_url)?;

        let username = pick(overrides.username, &self.username)
            .ok_or_else(|| missing("username", "--os-username", "OS_USERNAME"))?;
        let tenant_name = pick(overrides.tenant_name, &self.tenant_name)
            .ok_or_else(|| missing("tenant name", "--os-tenant-name", "OS_TENANT_NAME"))?;
        let password = overrides
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("password", "--os-password", "OS_PASSWORD"))?;

        Ok(ConnectionSettings {
            auth_url,
            username,
            password,
            tenant_name,
            endpoint_type: overrides
                .endpoint_type
                .or(self.endpoint_type)
                .unwrap_or_default(),
            region_name: pick(overrides.region_name, &self.region_name),
        })
    }
}

fn pick(given: Option<String>, stored: &Option<String>) -> Option<String> {
    given
        .filter(|v| !v.is_empty())
        .or_else(|| stored.clone().filter(|v| !v.is_empty()))
}

fn missing(what: &str, flag: &str, env: &str) -> anyhow::Error {
    anyhow!("No {} configured. Set {} or use the {} flag", what, env, flag)
}

fn validate_auth_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).with_context(|| format!("Invalid identity endpoint '{}'", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "Invalid identity endpoint '{}': expected an http or https URL",
            raw
        ));
    }
    Ok(())
}
