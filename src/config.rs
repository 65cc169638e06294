//! Dashboard configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{FALLBACK_CONTAINER_WIDTH, HOVER_SCALE};

pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_STORE_PATH: &str = "hexboard-store.json";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Card container width used until a real measurement arrives.
    pub container_width: f64,
    pub refresh_period: Duration,
    pub store_path: PathBuf,
    pub hover_scale: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            container_width: FALLBACK_CONTAINER_WIDTH,
            refresh_period: Duration::from_secs(DEFAULT_REFRESH_SECS),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            hover_scale: HOVER_SCALE,
        }
    }
}

impl DashboardConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `HEXBOARD_CONTAINER_WIDTH`: default 1000
    /// - `HEXBOARD_REFRESH_SECS`: default 30
    /// - `HEXBOARD_STORE_PATH`: default `hexboard-store.json`
    /// - `HEXBOARD_HOVER_SCALE`: default 2.2
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup. Unparseable or
    /// non-positive numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let container_width = parse_positive(&lookup, "HEXBOARD_CONTAINER_WIDTH", defaults.container_width);
        let refresh_secs = lookup("HEXBOARD_REFRESH_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REFRESH_SECS);
        let store_path = lookup("HEXBOARD_STORE_PATH")
            .filter(|v| !v.is_empty())
            .map_or(defaults.store_path, PathBuf::from);
        let hover_scale = parse_positive(&lookup, "HEXBOARD_HOVER_SCALE", defaults.hover_scale);

        Self { container_width, refresh_period: Duration::from_secs(refresh_secs), store_path, hover_scale }
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    lookup(key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}
