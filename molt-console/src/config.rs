use std::sync::OnceLock;

use crate::poll::PollPolicy;

/// Browser storage key for a per-browser API base override
const API_BASE_KEY: &str = "molt-service-url";

/// Port the MOLT service listens on in local development
const LOCAL_SERVICE_URL: &str = "http://localhost:4500";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base URL of the MOLT service, without trailing slash. Empty means same origin.
    pub api_base: String,
    /// Poll policy shared by the task detail pages
    pub poll: PollPolicy,
}

impl ConsoleConfig {
    /// Resolve the service location.
    ///
    /// Order: compile-time `MOLT_SERVICE_URL`, a browser storage override,
    /// localhost development default, then same origin.
    pub fn resolve() -> Self {
        let api_base = option_env!("MOLT_SERVICE_URL")
            .map(ToString::to_string)
            .or_else(get_cached_api_base)
            .unwrap_or_else(|| default_api_base(&current_hostname()));

        Self {
            api_base: normalize_base(&api_base),
            poll: PollPolicy::default(),
        }
    }
}

static CONFIG_CACHE: OnceLock<ConsoleConfig> = OnceLock::new();

/// Console configuration, computed at first use
pub fn config() -> &'static ConsoleConfig {
    CONFIG_CACHE.get_or_init(ConsoleConfig::resolve)
}

pub fn api_base() -> &'static str {
    config().api_base.as_str()
}

fn current_hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// Local development points at the service port; anything else is served by the service itself.
pub fn default_api_base(hostname: &str) -> String {
    if hostname == "localhost" || hostname == "127.0.0.1" {
        LOCAL_SERVICE_URL.to_string()
    } else {
        String::new()
    }
}

pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

pub fn get_cached_api_base() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|base| base.starts_with("http://") || base.starts_with("https://"))
}

/// Takes effect on next page load.
pub fn set_cached_api_base(base: &str) {
    if let Some(storage) =
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    {
        let _ = storage.set_item(API_BASE_KEY, &normalize_base(base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_targets_service_port() {
        assert_eq!(default_api_base("localhost"), "http://localhost:4500");
        assert_eq!(default_api_base("127.0.0.1"), "http://localhost:4500");
    }

    #[test]
    fn deployed_console_uses_same_origin() {
        assert_eq!(default_api_base("console.example.com"), "");
    }

    #[test]
    fn base_is_normalized_without_trailing_slash() {
        assert_eq!(normalize_base(" http://svc:4500/ "), "http://svc:4500");
        assert_eq!(normalize_base("http://svc:4500"), "http://svc:4500");
    }
}
