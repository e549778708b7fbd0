//! Process configuration read from environment variables.
//!
//! Every setting has a default. A value that is present but unparsable is
//! logged and replaced by the default; configuration never fails startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use mandi_ai::RetryPolicy;
use tracing::warn;

use crate::broadcast::BroadcastConfig;
use crate::gemini::GeminiConfig;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;
pub const DEFAULT_BROADCAST_DELAY_MS: u64 = 3000;
pub const DEFAULT_BID_VARIANCE: f64 = 0.10;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` when no API key is configured.
    pub gemini: Option<GeminiConfig>,
    pub retry: RetryPolicy,
    pub broadcast: BroadcastConfig,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|api_key| GeminiConfig {
                api_key,
                model: string_or(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: string_or(&lookup, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                ..GeminiConfig::default()
            });

        let max_attempts = parsed_or(&lookup, "TRANSLATE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS, |v| *v >= 1);
        let base_delay_ms = parsed_or(&lookup, "TRANSLATE_BASE_DELAY_MS", DEFAULT_BASE_DELAY_MS, |_| true);
        let broadcast_delay_ms = parsed_or(&lookup, "BROADCAST_DELAY_MS", DEFAULT_BROADCAST_DELAY_MS, |_| true);
        let variance = parsed_or(&lookup, "BID_VARIANCE", DEFAULT_BID_VARIANCE, |v| {
            v.is_finite() && (0.0..1.0).contains(v)
        });

        let fallback_addr = SocketAddr::from(([0, 0, 0, 0], 8080));
        let bind_addr = parsed_or(&lookup, "BIND_ADDR", fallback_addr, |_| true);

        Self {
            gemini,
            retry: RetryPolicy::exponential(max_attempts, Duration::from_millis(base_delay_ms)),
            broadcast: BroadcastConfig {
                delay: Duration::from_millis(broadcast_delay_ms),
                variance,
            },
            bind_addr,
        }
    }
}

fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_or<T, F, P>(lookup: &F, key: &str, default: T, accept: P) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
    P: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            warn!(key, value = %raw, default = ?default, "invalid configuration value; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);

        assert!(cfg.gemini.is_none());
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.retry.base_delay, Duration::from_millis(1000));
        assert_eq!(cfg.broadcast.delay, Duration::from_millis(3000));
        assert_eq!(cfg.broadcast.variance, 0.10);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn blank_api_key_means_unavailable() {
        assert!(config(&[("GEMINI_API_KEY", "   ")]).gemini.is_none());
    }

    #[test]
    fn api_key_enables_gemini_with_model_defaults() {
        let cfg = config(&[("GEMINI_API_KEY", "secret"), ("GEMINI_MODEL", "gemini-pro")]);
        let gemini = cfg.gemini.unwrap();

        assert_eq!(gemini.api_key, "secret");
        assert_eq!(gemini.model, "gemini-pro");
        assert_eq!(gemini.base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn numeric_overrides_are_applied() {
        let cfg = config(&[
            ("TRANSLATE_MAX_ATTEMPTS", "5"),
            ("TRANSLATE_BASE_DELAY_MS", "10"),
            ("BROADCAST_DELAY_MS", "50"),
            ("BID_VARIANCE", "0.25"),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]);

        assert_eq!(cfg.retry.max_attempts, 5);
        assert_eq!(cfg.retry.delay_for_attempt(2), Duration::from_millis(20));
        assert_eq!(cfg.broadcast.delay, Duration::from_millis(50));
        assert_eq!(cfg.broadcast.variance, 0.25);
        assert_eq!(cfg.bind_addr.port(), 9000);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = config(&[
            ("TRANSLATE_MAX_ATTEMPTS", "0"),
            ("TRANSLATE_BASE_DELAY_MS", "soon"),
            ("BID_VARIANCE", "1.5"),
            ("BIND_ADDR", "localhost"),
        ]);

        assert_eq!(cfg.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cfg.retry.base_delay, Duration::from_millis(DEFAULT_BASE_DELAY_MS));
        assert_eq!(cfg.broadcast.variance, DEFAULT_BID_VARIANCE);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }
}
