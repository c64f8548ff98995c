use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const LEARN_MORE_URL: &str = "https://docs.linuxfoundation.org/docs/communitybridge/easycla";
pub const TICKET_URL: &str = "https://jira.linuxfoundation.org/servicedesk/customer/portal/4/create/143";
pub const GITHUB_EMAIL_URL: &str = "https://github.com/settings/emails";

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_url: String,
    pub session_key: Option<String>,
    pub lfx_header_enabled: bool,
    pub lfx_header_url: String,
    pub project_login_url: String,
    pub corporate_login_url: String,
    pub identity_url: String,
    pub search_debounce: Duration,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            session_key: None,
            lfx_header_enabled: false,
            lfx_header_url: String::new(),
            project_login_url: "/login".to_string(),
            corporate_login_url: "/login".to_string(),
            identity_url: "https://identity.linuxfoundation.org/".to_string(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or unparsable keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string_or = |key: &str, fallback: String| {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
        };
        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };
        let secs = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            bind_addr: string_or("BIND_ADDR", defaults.bind_addr),
            api_url: string_or("CLA_API_URL", defaults.api_url)
                .trim_end_matches('/')
                .to_string(),
            session_key: lookup("SESSION_KEY"),
            lfx_header_enabled: lookup("LFX_HEADER_ENABLED").is_some_and(|v| v.trim() == "true"),
            lfx_header_url: string_or("LFX_HEADER_URL", defaults.lfx_header_url),
            project_login_url: string_or("PROJECT_LOGIN_URL", defaults.project_login_url),
            corporate_login_url: string_or("CORPORATE_LOGIN_URL", defaults.corporate_login_url),
            identity_url: string_or("IDENTITY_URL", defaults.identity_url),
            search_debounce: millis("SEARCH_DEBOUNCE_MS", defaults.search_debounce),
            http_timeout: secs("HTTP_TIMEOUT_SECS", defaults.http_timeout),
        }
    }
}
