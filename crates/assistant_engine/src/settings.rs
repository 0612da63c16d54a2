use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the analysis service base URL.
pub const API_URL_ENV: &str = "CAREER_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Base URL baked in at build time, if the build environment set one.
const BUILD_TIME_API_URL: Option<&str> = option_env!("CAREER_API_URL");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ClientSettings {
    /// Resolves the base URL from the runtime environment (including `.env`),
    /// then the build-time value, then the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let runtime = std::env::var(API_URL_ENV).ok();
        Self::default().with_base_url(resolve_base_url(runtime.as_deref(), BUILD_TIME_API_URL))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        self.base_url = parsed;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base has.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

fn resolve_base_url<'a>(runtime: Option<&'a str>, build_time: Option<&'a str>) -> &'a str {
    runtime
        .filter(|value| !value.trim().is_empty())
        .or(build_time.filter(|value| !value.trim().is_empty()))
        .unwrap_or(DEFAULT_API_URL)
}
