//! Runtime settings read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `STROKESENSE_LOG_MODE` | `auto` (`file` when stdout is a TTY, else `stdout`) |
//! | `STROKESENSE_LOG_FILE` | `strokesense.log` |
//! | `STROKESENSE_COMPUTE_DELAY_MS` | `1000` |
//! | `STROKESENSE_DEFAULT_MODEL` | unset |
//!
//! The sanitizer's `STROKESENSE_SANITIZE_MAX_BYTES` is read lazily by
//! `adapters::sanitize` since it applies to every log line.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::ModelVariant;
use crate::StrokeSenseError;

const DEFAULT_LOG_FILE: &str = "strokesense.log";
const DEFAULT_COMPUTE_DELAY_MS: u64 = 1000;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_mode: LogMode,

    pub log_file: PathBuf,

    /// How long the UI shows the "computing" indication before the result
    pub compute_delay: Duration,

    /// Model pre-selected in the picker
    pub default_model: Option<ModelVariant>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            compute_delay: Duration::from_millis(DEFAULT_COMPUTE_DELAY_MS),
            default_model: None,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    ///
    /// # Errors
    /// Returns `StrokeSenseError::Config` for an unparseable delay or an
    /// unknown default model.
    pub fn from_env() -> Result<Self, StrokeSenseError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// See [`Settings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StrokeSenseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_mode = lookup("STROKESENSE_LOG_MODE")
            .map(|v| LogMode::parse(&v))
            .unwrap_or(defaults.log_mode);

        let log_file = lookup("STROKESENSE_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let compute_delay = match lookup("STROKESENSE_COMPUTE_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    StrokeSenseError::Config(format!(
                        "STROKESENSE_COMPUTE_DELAY_MS='{raw}' is not a whole number \
                         of milliseconds: {e}"
                    ))
                })?,
            None => defaults.compute_delay,
        };

        let default_model = match lookup("STROKESENSE_DEFAULT_MODEL") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<ModelVariant>()
                    .map_err(|e| {
                        StrokeSenseError::Config(format!("STROKESENSE_DEFAULT_MODEL: {e}"))
                    })?,
            ),
            _ => None,
        };

        Ok(Self {
            log_mode,
            log_file,
            compute_delay,
            default_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None).expect("Should load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.compute_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("STROKESENSE_LOG_MODE", "stdout"),
            ("STROKESENSE_LOG_FILE", "/tmp/ss.log"),
            ("STROKESENSE_COMPUTE_DELAY_MS", "0"),
            ("STROKESENSE_DEFAULT_MODEL", "Decision Tree"),
        ]))
        .expect("Should load");

        assert_eq!(settings.log_mode, LogMode::Stdout);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/ss.log"));
        assert_eq!(settings.compute_delay, Duration::ZERO);
        assert_eq!(settings.default_model, Some(ModelVariant::DecisionTree));
    }

    #[test]
    fn test_bad_delay_is_config_error() {
        let err = Settings::from_lookup(lookup_from(&[("STROKESENSE_COMPUTE_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, StrokeSenseError::Config(_)));
    }

    #[test]
    fn test_unknown_model_is_config_error() {
        let err = Settings::from_lookup(lookup_from(&[(
            "STROKESENSE_DEFAULT_MODEL",
            "Random Forest",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("Random Forest"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("garbage"), LogMode::Auto);
    }
}
