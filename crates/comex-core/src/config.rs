//! Configuration for a COMEX project directory.
//!
//! Read from `<project>/.comex/config.toml` when present. `COMEX_BACKEND`,
//! `COMEX_DATA_DIR` and `REDIS_URL` override the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use comex_store::BackendSpec;
use serde::{Deserialize, Serialize};

use crate::error::{ComexError, ComexResult};

/// Directory holding configuration and local data inside a project.
pub const CONFIG_DIR: &str = ".comex";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Which storage backend holds the collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Redis,
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Redis => "redis",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ComexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(ComexError::config(format!(
                "Invalid backend '{}'. Valid backends: file, redis, memory",
                s
            ))),
        }
    }
}

/// Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory for the file backend, relative to the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Redis server URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix for Redis keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Seed demonstration processes when none can be loaded
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "comex".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: None,
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Location of the config file for a project.
    pub fn path_for(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> ComexResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ComexError::config(e.to_string()))
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ComexResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ComexError::config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Project config (or defaults) with environment overrides applied.
    pub fn load_for_project(project_dir: &Path) -> ComexResult<Self> {
        let path = Self::path_for(project_dir);
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `COMEX_BACKEND`, `COMEX_DATA_DIR` and `REDIS_URL` as found by
    /// `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ComexResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("COMEX_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("COMEX_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("REDIS_URL") {
            self.redis_url = url;
        }
        Ok(())
    }

    /// Resolved data directory for the file backend.
    pub fn data_dir(&self, project_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_dir.join(dir),
            None => project_dir.join(CONFIG_DIR).join("data"),
        }
    }

    /// Backend description for `comex_store::connect`.
    pub fn backend_spec(&self, project_dir: &Path) -> BackendSpec {
        match self.backend {
            BackendKind::File => BackendSpec::File {
                dir: self.data_dir(project_dir),
            },
            BackendKind::Redis => BackendSpec::Redis {
                url: self.redis_url.clone(),
                prefix: self.key_prefix.clone(),
            },
            BackendKind::Memory => BackendSpec::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::File);
        assert!(config.seed_demo_data);
        assert_eq!(
            config.backend_spec(Path::new("/srv/office")),
            BackendSpec::File {
                dir: PathBuf::from("/srv/office/.comex/data")
            }
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("backend = \"redis\"\n").unwrap();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.key_prefix, "comex");
        assert_eq!(
            config.backend_spec(Path::new(".")),
            BackendSpec::Redis {
                url: "redis://127.0.0.1:6379".into(),
                prefix: "comex".into()
            }
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_for(dir.path());
        let config = Config {
            backend: BackendKind::Memory,
            seed_demo_data: false,
            ..Default::default()
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        assert_eq!(Config::load_for_project(dir.path()).unwrap().backend, BackendKind::Memory);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_for(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "backend = 42").unwrap();

        assert!(matches!(Config::load(&path), Err(ComexError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("COMEX_BACKEND", "redis"),
            ("COMEX_DATA_DIR", "/var/lib/comex"),
            ("REDIS_URL", "redis://cache:6379"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();

        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.data_dir(Path::new("/x")), PathBuf::from("/var/lib/comex"));
    }

    #[test]
    fn test_bad_backend_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|name| {
            (name == "COMEX_BACKEND").then(|| "sqlite".to_string())
        });
        assert!(matches!(result, Err(ComexError::Config(_))));
    }

    #[test]
    fn test_relative_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("store")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(Path::new("/office")), PathBuf::from("/office/store"));
    }
}
