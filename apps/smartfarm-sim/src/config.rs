use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Locale;
use crate::render::View;
use crate::simulator::JitterProfile;

const MIN_TICK_MS: u64 = 250;

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigOverrides {
    #[serde(default)]
    view: Option<View>,
    #[serde(default)]
    locale: Option<Locale>,
    #[serde(default)]
    tick_ms: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ansi: Option<bool>,
}

fn load_overrides(path: &Path) -> Option<ConfigOverrides> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config override file not found");
        return None;
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to read config overrides; using env defaults"
            );
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to parse config overrides; using env defaults"
            );
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub view: View,
    pub locale: Locale,
    pub tick_ms: Option<u64>,
    pub seed: Option<u64>,
    pub ansi: bool,
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: View::Dashboard,
            locale: Locale::En,
            tick_ms: None,
            seed: None,
            ansi: true,
            config_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an env-like lookup. Values set in the environment win over
    /// the JSON override file named by `SMARTFARM_CONFIG_PATH`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        config.config_path = get("SMARTFARM_CONFIG_PATH").map(PathBuf::from);
        if let Some(overrides) = config.config_path.as_deref().and_then(load_overrides) {
            config.apply_overrides(&overrides);
        }

        if let Some(raw) = get("SMARTFARM_VIEW") {
            config.view = raw.parse::<View>().context("invalid SMARTFARM_VIEW")?;
        }
        if let Some(raw) = get("SMARTFARM_LOCALE") {
            config.locale = raw.parse::<Locale>().context("invalid SMARTFARM_LOCALE")?;
        }
        if let Some(raw) = get("SMARTFARM_TICK_MS") {
            config.tick_ms = Some(raw.parse::<u64>().context("invalid SMARTFARM_TICK_MS")?);
        }
        if let Some(raw) = get("SMARTFARM_SEED") {
            config.seed = Some(raw.parse::<u64>().context("invalid SMARTFARM_SEED")?);
        }
        if let Some(raw) = get("SMARTFARM_ANSI") {
            config.ansi = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(view) = overrides.view {
            self.view = view;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(tick_ms) = overrides.tick_ms.filter(|v| *v != 0) {
            self.tick_ms = Some(tick_ms);
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(ansi) = overrides.ansi {
            self.ansi = ansi;
        }
    }

    pub fn profile(&self) -> JitterProfile {
        JitterProfile::for_view(self.view)
    }

    /// Refresh period: the configured tick, or the view's own cadence when unset.
    pub fn tick_interval(&self) -> Duration {
        match self.tick_ms {
            Some(ms) => Duration::from_millis(ms.max(MIN_TICK_MS)),
            None => self.profile().default_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_the_dashboard() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(3000));
    }

    #[test]
    fn ventilation_view_ticks_faster() {
        let config = config_from(&[("SMARTFARM_VIEW", "ventilation")]).unwrap();
        assert_eq!(config.view, View::Ventilation);
        assert_eq!(config.tick_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn env_values_are_parsed() {
        let config = config_from(&[
            ("SMARTFARM_LOCALE", " hi "),
            ("SMARTFARM_TICK_MS", "2500"),
            ("SMARTFARM_SEED", "99"),
            ("SMARTFARM_ANSI", "false"),
        ])
        .unwrap();
        assert_eq!(config.locale, Locale::Hi);
        assert_eq!(config.tick_interval(), Duration::from_millis(2500));
        assert_eq!(config.seed, Some(99));
        assert!(!config.ansi);
    }

    #[test]
    fn tick_has_a_floor() {
        let config = config_from(&[("SMARTFARM_TICK_MS", "10")]).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = config_from(&[("SMARTFARM_LOCALE", "fr")]).unwrap_err();
        assert!(err.to_string().contains("SMARTFARM_LOCALE"));
        assert!(config_from(&[("SMARTFARM_TICK_MS", "soon")]).is_err());
        assert!(config_from(&[("SMARTFARM_VIEW", "settings")]).is_err());
    }

    #[test]
    fn override_file_applies_where_env_is_silent() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"view": "ventilation", "locale": "es", "seed": 5, "ansi": false}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = config_from(&[
            ("SMARTFARM_CONFIG_PATH", path.as_str()),
            ("SMARTFARM_LOCALE", "hi"),
        ])
        .unwrap();
        assert_eq!(config.view, View::Ventilation);
        assert_eq!(config.locale, Locale::Hi);
        assert_eq!(config.seed, Some(5));
        assert!(!config.ansi);
    }

    #[test]
    fn unreadable_override_file_is_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = config_from(&[("SMARTFARM_CONFIG_PATH", path.as_str())]).unwrap();
        assert_eq!(config.view, View::Dashboard);
        assert_eq!(config.config_path.as_deref(), Some(file.path()));

        let missing = config_from(&[("SMARTFARM_CONFIG_PATH", "/nonexistent/smartfarm.json")])
            .unwrap();
        assert_eq!(missing.locale, Locale::En);
    }
}
