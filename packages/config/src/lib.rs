// ABOUTME: Runtime configuration for Roikit
// ABOUTME: Resolves catalog, preference and calculation settings from environment variables

pub mod constants;

use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use constants::*;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid oversight factor: {0}. Must be a number between 0 and 1")]
    InvalidOversightFactor(String),

    #[error("{0} is set but empty")]
    EmptyPath(&'static str),

    #[error("Unable to determine home directory; set ROIKIT_HOME or ROIKIT_PREFERENCES_PATH")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog JSON overriding the built-in one
    pub catalog_path: Option<PathBuf>,
    pub preferences_path: PathBuf,
    /// Overrides each calculator's own oversight factor when set
    pub oversight_factor: Option<f64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = match lookup(ROIKIT_CATALOG_PATH) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::EmptyPath(ROIKIT_CATALOG_PATH))
            }
            Some(path) => Some(PathBuf::from(path.trim())),
            None => None,
        };

        let preferences_path = match lookup(ROIKIT_PREFERENCES_PATH) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::EmptyPath(ROIKIT_PREFERENCES_PATH))
            }
            Some(path) => PathBuf::from(path.trim()),
            None => roikit_dir(&lookup)?.join(PREFERENCES_FILE_NAME),
        };

        let oversight_factor = lookup(ROIKIT_OVERSIGHT_FACTOR)
            .map(|raw| parse_oversight_factor(&raw))
            .transpose()?;

        let config = Config {
            catalog_path,
            preferences_path,
            oversight_factor,
        };
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

/// Get the Roikit data directory (~/.roikit unless ROIKIT_HOME is set)
fn roikit_dir<F>(lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ROIKIT_HOME).filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir.trim()));
    }

    // HOME first (useful for tests), then the platform lookup
    lookup(HOME)
        .or_else(|| lookup(USERPROFILE))
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .map(|home| home.join(ROIKIT_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

fn parse_oversight_factor(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidOversightFactor(raw.to_string()))?;

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidOversightFactor(raw.to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_home_directory() {
        let config = Config::from_lookup(lookup_from(&[(HOME, "/home/alice")])).unwrap();

        assert_eq!(config.catalog_path, None);
        assert_eq!(config.oversight_factor, None);
        assert_eq!(
            config.preferences_path,
            PathBuf::from("/home/alice/.roikit/preferences.json")
        );
    }

    #[test]
    fn test_roikit_home_overrides_home() {
        let config = Config::from_lookup(lookup_from(&[
            (HOME, "/home/alice"),
            (ROIKIT_HOME, "/srv/roikit"),
        ]))
        .unwrap();

        assert_eq!(
            config.preferences_path,
            PathBuf::from("/srv/roikit/preferences.json")
        );
    }

    #[test]
    fn test_explicit_paths() {
        let config = Config::from_lookup(lookup_from(&[
            (ROIKIT_CATALOG_PATH, "/etc/roikit/catalog.json"),
            (ROIKIT_PREFERENCES_PATH, " /tmp/prefs.json "),
        ]))
        .unwrap();

        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/roikit/catalog.json"))
        );
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn test_empty_catalog_path_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            (HOME, "/home/alice"),
            (ROIKIT_CATALOG_PATH, "  "),
        ]));

        assert_eq!(result, Err(ConfigError::EmptyPath(ROIKIT_CATALOG_PATH)));
    }

    #[rstest]
    #[case("0.25", 0.25)]
    #[case("0", 0.0)]
    #[case(" 1.0 ", 1.0)]
    fn test_valid_oversight_factor(#[case] raw: &str, #[case] expected: f64) {
        let config = Config::from_lookup(lookup_from(&[
            (HOME, "/home/alice"),
            (ROIKIT_OVERSIGHT_FACTOR, raw),
        ]))
        .unwrap();

        assert_eq!(config.oversight_factor, Some(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("-0.1")]
    #[case("1.5")]
    #[case("NaN")]
    fn test_invalid_oversight_factor(#[case] raw: &str) {
        let result = Config::from_lookup(lookup_from(&[
            (HOME, "/home/alice"),
            (ROIKIT_OVERSIGHT_FACTOR, raw),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidOversightFactor(_))
        ));
    }
}
