//! Configuration loading
//!
//! Settings come from an optional TOML file and the standard AWS environment
//! variables, in that order of precedence (environment wins):
//!
//! ```toml
//! region = "eu-west-1"
//! regions = ["us-east-1", "eu-west-1"]
//! profile = "staging"
//! ```
//!
//! The file lives at `$AWS_DASH_CONFIG`, or `<config dir>/aws-dash/config.toml`.
//! A missing file is not an error.

use crate::aws::ClientSettings;
use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "AWS_DASH_CONFIG";

pub const DEFAULT_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-south-1",
    "eu-south-2",
    "eu-north-1",
    "il-central-1",
    "me-south-1",
    "me-central-1",
    "sa-east-1",
];

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub region: Option<String>,
    pub regions: Option<Vec<String>>,
    pub profile: Option<String>,
}

/// Values taken from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            region: var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION")),
            profile: var("AWS_PROFILE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: String,
    pub regions: Vec<String>,
    pub profile: Option<String>,
}

impl Config {
    pub fn resolve(file: FileConfig, env: &EnvOverrides) -> Result<Self, ConfigError> {
        let regions = file
            .regions
            .unwrap_or_else(|| DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect());
        if regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }

        let region = env
            .region
            .clone()
            .or(file.region)
            .unwrap_or_else(|| regions[0].clone());

        let pattern = region_pattern();
        for name in regions.iter().chain(std::iter::once(&region)) {
            if !pattern.is_match(name) {
                return Err(ConfigError::InvalidRegion(name.clone()));
            }
        }

        Ok(Self {
            region,
            regions,
            profile: env.profile.clone().or(file.profile),
        })
    }

    /// The region after the current one, wrapping around. `None` when the
    /// current region is not part of the list.
    pub fn next_region(&self) -> Option<&str> {
        let index = self.regions.iter().position(|r| *r == self.region)?;
        let next = (index + 1) % self.regions.len();
        Some(&self.regions[next])
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            region: self.region.clone(),
            profile: self.profile.clone(),
        }
    }
}

fn region_pattern() -> Regex {
    Regex::new(r"^[a-z]{2}(-[a-z]+)+-[0-9]+$").expect("static region pattern")
}

/// Path of the configuration file, honouring `AWS_DASH_CONFIG`.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aws-dash")
        .join("config.toml")
}

/// Loads the configuration from the default path and the environment.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path(), &EnvOverrides::from_env())
}

pub fn load_from(path: &Path, env: &EnvOverrides) -> Result<Config, ConfigError> {
    let file = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            FileConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = Config::resolve(file, env)?;
    tracing::info!(
        "Loaded config: region={} regions={} profile={:?}",
        config.region,
        config.regions.len(),
        config.profile
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(region: &str, regions: &[&str]) -> Config {
        Config {
            region: region.to_string(),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            profile: None,
        }
    }

    #[test]
    fn test_next_region_advances() {
        let cfg = config("us-east-1", &["us-east-1", "us-west-2", "eu-west-1"]);
        assert_eq!(cfg.next_region(), Some("us-west-2"));
    }

    #[test]
    fn test_next_region_wraps_around() {
        let cfg = config("eu-west-1", &["us-east-1", "us-west-2", "eu-west-1"]);
        assert_eq!(cfg.next_region(), Some("us-east-1"));
    }

    #[test]
    fn test_next_region_unknown_current_is_none() {
        let cfg = config("ap-south-1", &["us-east-1", "us-west-2"]);
        assert_eq!(cfg.next_region(), None);
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let cfg = Config::resolve(FileConfig::default(), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.regions.len(), DEFAULT_REGIONS.len());
        assert_eq!(cfg.profile, None);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            region: Some("eu-west-1".to_string()),
            regions: None,
            profile: Some("file-profile".to_string()),
        };
        let env = EnvOverrides {
            region: Some("us-west-2".to_string()),
            profile: Some("env-profile".to_string()),
        };
        let cfg = Config::resolve(file, &env).unwrap();
        assert_eq!(cfg.region, "us-west-2");
        assert_eq!(cfg.profile.as_deref(), Some("env-profile"));
    }

    #[test]
    fn test_empty_regions_rejected() {
        let file = FileConfig {
            regions: Some(Vec::new()),
            ..Default::default()
        };
        let err = Config::resolve(file, &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoRegions));
    }

    #[test]
    fn test_malformed_region_rejected() {
        let env = EnvOverrides {
            region: Some("Frankfurt".to_string()),
            profile: None,
        };
        let err = Config::resolve(FileConfig::default(), &env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegion(r) if r == "Frankfurt"));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("absent.toml"), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.region, "us-east-1");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "region = \"eu-west-1\"\nregions = [\"us-east-1\", \"eu-west-1\"]\nprofile = \"ops\""
        )
        .unwrap();

        let cfg = load_from(&path, &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(cfg.regions, vec!["us-east-1", "eu-west-1"]);
        assert_eq!(cfg.profile.as_deref(), Some("ops"));
        assert_eq!(cfg.next_region(), Some("us-east-1"));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "region = [").unwrap();
        let err = load_from(&path, &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
