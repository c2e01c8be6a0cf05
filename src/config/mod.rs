use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::{Host, Url};

/// Fallback backend used whenever the console runs against a local host
pub const LOCAL_API_URL: &str = "http://localhost:5000";

/// Rows shown per page unless a screen or the environment says otherwise
pub const DEFAULT_PAGE_SIZE: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit backend URL (build/deploy time), wins over host detection
    pub base_url: Option<String>,
    /// Host the console is served from, used for local detection
    pub console_host: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Overrides every screen's own page size when set
    pub page_size: Option<usize>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("VTS_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = env::var("VTS_CONSOLE_HOST") {
            if !v.trim().is_empty() {
                self.api.console_host = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("VTS_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("VTS_PAGE_SIZE") {
            match v.parse::<usize>() {
                Ok(size) if size > 0 => self.view.page_size = Some(size),
                _ => tracing::warn!("ignoring VTS_PAGE_SIZE={:?}", v),
            }
        }

        self
    }

    /// Backend URL the console talks to.
    pub fn api_base_url(&self) -> String {
        resolve_base_url(self.api.base_url.as_deref(), &self.api.console_host)
    }

    pub fn page_size_for(&self, screen_default: usize) -> usize {
        self.view.page_size.unwrap_or(screen_default)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: None,
                console_host: "localhost".to_string(),
                enable_request_logging: true,
            },
            view: ViewConfig {
                page_size: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: None,
                console_host: "localhost".to_string(),
                enable_request_logging: true,
            },
            view: ViewConfig {
                page_size: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: None,
                console_host: "localhost".to_string(),
                enable_request_logging: false,
            },
            view: ViewConfig {
                page_size: None,
            },
        }
    }
}

/// Pick the backend URL: explicit override first, then the local fallback
/// for local hosts, then same-origin on the console host.
pub fn resolve_base_url(explicit: Option<&str>, console_host: &str) -> String {
    if let Some(url) = explicit {
        return url.trim_end_matches('/').to_string();
    }

    if is_local_host(console_host) {
        return LOCAL_API_URL.to_string();
    }

    format!("https://{}", console_host.trim_end_matches('/'))
}

/// Whether a console host (`host`, `host:port`, `[v6]:port` or a full URL)
/// names this machine
pub fn is_local_host(host: &str) -> bool {
    let host = host.trim();
    let parsed = if host.contains("://") {
        Url::parse(host)
    } else {
        Url::parse(&format!("http://{}", host))
    };

    match parsed.ok().as_ref().and_then(Url::host) {
        Some(Host::Domain(name)) => name.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_unspecified(),
        Some(Host::Ipv6(ip)) => ip.is_loopback() || ip.is_unspecified(),
        None => false,
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
