//! Configuration file loading and parsing

use crate::error::{Error, Result};
use crate::types::{AttemptSettings, SettingsFile};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["reattempt.yaml", "reattempt.yml"];

/// Loaded and validated reattempt configuration
#[derive(Debug, Clone, Default)]
pub struct ReattemptConfig {
    /// The parsed settings
    pub settings: SettingsFile,

    /// Path the settings were read from, `None` when running on built-in defaults
    pub config_path: Option<Utf8PathBuf>,
}

impl ReattemptConfig {
    /// Load configuration from the specified path
    ///
    /// An explicit path must exist. Without one, the current directory and its
    /// parents are searched and the built-in defaults are used when nothing is
    /// found.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::config_not_found(p.as_str())
                    } else {
                        Error::Io(e)
                    }
                })?;
                (p.to_owned(), content)
            }
            None => match Self::find_config()? {
                Some(found) => found,
                None => {
                    tracing::debug!("no reattempt.yaml found, using built-in defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %config_path, "loaded configuration");

        Ok(Self {
            config_path: Some(config_path),
            ..config
        })
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: SettingsFile = serde_yaml_ng::from_str(content)?;
        validate(&settings)?;

        Ok(Self {
            settings,
            config_path: None,
        })
    }

    /// Render the built-in defaults as YAML, used by `config init`
    pub fn default_yaml() -> Result<String> {
        Ok(serde_yaml_ng::to_string(&SettingsFile::default())?)
    }

    /// Resolve the settings for a label
    pub fn settings_for(&self, label: &str) -> &AttemptSettings {
        self.settings.settings_for(label)
    }

    /// Find configuration file in current directory or parent directories
    fn find_config() -> Result<Option<(Utf8PathBuf, String)>> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;

        let mut current = cwd.as_path();

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    let content = fs::read_to_string(&path)?;
                    return Ok(Some((path, content)));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }
    }
}

fn validate(settings: &SettingsFile) -> Result<()> {
    check_settings("defaults", &settings.defaults)?;
    for (label, entry) in &settings.labels {
        check_settings(label, entry)?;
    }
    Ok(())
}

fn check_settings(scope: &str, settings: &AttemptSettings) -> Result<()> {
    if !settings.base_delay.is_finite() || settings.base_delay < 0.0 {
        return Err(Error::invalid_config(format!(
            "{}: base-delay must be a non-negative number, got {}",
            scope, settings.base_delay
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeUnit;
    use serial_test::serial;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
defaults:
  base-delay: 2.0
  retries: 4
labels:
  fetch-index:
    base-delay: 0.5
    retries: 1
    time-unit: milliseconds
"#;

    #[test]
    fn test_from_yaml() {
        let config = ReattemptConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.settings.defaults.base_delay, 2.0);
        assert_eq!(config.settings.defaults.retries, 4);

        let fetch = config.settings_for("fetch-index");
        assert_eq!(fetch.retries, 1);
        assert_eq!(fetch.time_unit, TimeUnit::Milliseconds);
        assert_eq!(config.settings_for("other").retries, 4);
    }

    #[test]
    fn test_negative_base_delay_rejected() {
        let yaml = "labels:\n  bad:\n    base-delay: -1.0\n";
        let err = ReattemptConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ReattemptConfig::from_yaml("defaults: [not, a, map]").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("custom.yaml")).unwrap();
        fs::write(&path, SAMPLE).unwrap();

        let config = ReattemptConfig::load(Some(&path)).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.settings.defaults.retries, 4);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = ReattemptConfig::load(Some(Utf8Path::new("/nonexistent/reattempt.yaml")))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_load_discovers_parent_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("reattempt.yaml"), SAMPLE).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(&nested).unwrap();
        let result = ReattemptConfig::load(None);
        std::env::set_current_dir(previous).unwrap();

        let config = result.unwrap();
        assert!(config.config_path.is_some());
        assert_eq!(config.settings.defaults.base_delay, 2.0);
    }

    #[test]
    fn test_default_yaml_parses_back() {
        let yaml = ReattemptConfig::default_yaml().unwrap();
        let config = ReattemptConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.settings, SettingsFile::default());
    }
}
