//! Backend configuration with a build-time default and runtime overrides.
//! The base URL is resolved once at startup; an empty value means requests are
//! sent same-origin (relative paths). Configuration values are public; do not
//! store secrets here.

use std::time::Duration;

/// Default request timeout (milliseconds) applied to every backend call.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load(runtime: RuntimeConfig) -> Self {
        let api_base_url = option_env!("VISITOR_PASS_BACKEND_URL").unwrap_or("");

        let mut config = Self {
            api_base_url: api_base_url.trim().to_string(),
            ..Self::default()
        };

        apply_runtime_overrides(&mut config, runtime);

        config
    }

    /// Convenience constructor for an explicit backend origin.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim().to_string(),
            ..Self::default()
        }
    }
}

/// Values supplied at runtime (command line or process environment).
#[derive(Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl RuntimeConfig {
    /// Builds runtime overrides, discarding blank values.
    #[must_use]
    pub fn new(api_base_url: Option<&str>, request_timeout_ms: Option<u64>) -> Self {
        Self {
            api_base_url: api_base_url.and_then(normalize_runtime_value),
            request_timeout_ms: request_timeout_ms.filter(|ms| *ms > 0),
        }
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.request_timeout_ms {
        config.request_timeout = Duration::from_millis(value);
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
