use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::HttpClient;
use crate::auth::Credential;
use crate::config::config;
use crate::session::CredentialStore;

const SETTINGS_FILE: &str = "settings.json";

/// Persistent CLI settings, kept next to the credential files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliSettings {
    /// Backend URL chosen with `vts config set-url`; beats the environment
    pub api_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CliSettings {
    pub fn api_base_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => config().api_base_url(),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("VTS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("vts").join("admin")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("failed to create {}", config_dir.display()))?;
    }

    Ok(config_dir)
}

pub fn load_settings() -> anyhow::Result<CliSettings> {
    let settings_file = get_config_dir()?.join(SETTINGS_FILE);

    if !settings_file.exists() {
        return Ok(CliSettings::default());
    }

    let content = fs::read_to_string(&settings_file)?;
    let settings: CliSettings = serde_json::from_str(&content)
        .with_context(|| format!("invalid {}", settings_file.display()))?;
    Ok(settings)
}

pub fn save_settings(settings: &CliSettings) -> anyhow::Result<()> {
    let settings_file = get_config_dir()?.join(SETTINGS_FILE);

    let content = serde_json::to_string_pretty(settings)?;
    fs::write(settings_file, content)?;
    Ok(())
}

/// Cookie and session credential files under the config directory
pub fn credential_store() -> anyhow::Result<CredentialStore> {
    Ok(CredentialStore::in_dir(&get_config_dir()?))
}

pub fn http_client(credential: Option<Credential>) -> anyhow::Result<HttpClient> {
    let settings = load_settings()?;
    let client = match settings.api_url {
        Some(_) => HttpClient::new(settings.api_base_url())
            .with_request_logging(config().api.enable_request_logging),
        None => HttpClient::from_config(config()),
    };

    Ok(match credential {
        Some(credential) => client.with_credential(credential),
        None => client,
    })
}
