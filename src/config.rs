use chrono::Offset;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub backend: BackendKind,
    pub display: DisplayKind,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
    pub tick_rate: Duration,
    pub auto_reset_delay: Duration,
    pub save_feedback_threshold: u64,
    pub fake_backend_latency: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            backend: BackendKind::Http,
            display: DisplayKind::Console,
            request_timeout: None,
            tick_rate: Duration::from_millis(100),
            auto_reset_delay: Duration::from_secs(2),
            save_feedback_threshold: 10,
            fake_backend_latency: Duration::from_millis(500),
            logger_timezone: local_timezone(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(api_url) = lookup("CLASSIFIER_API_URL") {
            let api_url = api_url.trim().trim_end_matches('/');
            if !api_url.is_empty() {
                config.api_url = api_url.to_string();
            }
        }

        if let Some(backend) = lookup("CLASSIFIER_BACKEND") {
            if backend.trim().eq_ignore_ascii_case("fake") {
                config.backend = BackendKind::Fake;
            }
        }

        if let Some(display) = lookup("CLASSIFIER_DISPLAY") {
            if display.trim().eq_ignore_ascii_case("gui") {
                config.display = DisplayKind::Gui;
            }
        }

        if let Some(timeout) = lookup("CLASSIFIER_TIMEOUT_SECS") {
            config.request_timeout = timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);
        }

        config
    }
}

fn local_timezone() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.display, DisplayKind::Console);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.auto_reset_delay, Duration::from_secs(2));
        assert_eq!(config.save_feedback_threshold, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CLASSIFIER_API_URL", "https://classifier.example.com/"),
            ("CLASSIFIER_BACKEND", "FAKE"),
            ("CLASSIFIER_DISPLAY", "gui"),
            ("CLASSIFIER_TIMEOUT_SECS", "15"),
        ]);

        assert_eq!(config.api_url, "https://classifier.example.com");
        assert_eq!(config.backend, BackendKind::Fake);
        assert_eq!(config.display, DisplayKind::Gui);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn empty_api_url_keeps_default() {
        let config = config_from(&[("CLASSIFIER_API_URL", "  ")]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn invalid_timeout_means_no_timeout() {
        let config = config_from(&[("CLASSIFIER_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.request_timeout, None);
    }
}
