//! Configuration management for `assetbake.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── bake       # [bake]
//! │   └── serve      # [serve]
//! ├── error          # ConfigError
//! ├── util           # Config discovery, path helpers
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The file is optional; every value can also come from the command line,
//! and command-line values win.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BakeConfig, ServeConfig};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::log;
use section::is_valid_tag;
use util::resolve_against;

/// Root configuration structure representing assetbake.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the loaded config file (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Generator settings
    pub bake: BakeConfig,

    /// Reference server settings
    pub serve: ServeConfig,
}

impl Config {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`.
    ///
    /// Unknown keys are reported and ignored. Relative paths inside the file
    /// are resolved against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().unwrap_or(Path::new(""));
        config.normalize_paths(root);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load `config_name` if it can be found (cwd and its ancestors), else defaults.
    pub fn discover(config_name: &Path) -> Result<Self, ConfigError> {
        match find_config_file(config_name) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    fn normalize_paths(&mut self, root: &Path) {
        for path in [
            &mut self.bake.input,
            &mut self.bake.output,
            &mut self.serve.base,
            &mut self.serve.pack,
        ]
        .into_iter()
        .flatten()
        {
            *path = resolve_against(root, path);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Update config option if a command-line value is provided.
    pub fn update_option<T: Clone>(config_option: &mut Option<T>, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = Some(option.clone());
        }
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tag) = &self.bake.tag
            && !is_valid_tag(tag)
        {
            return Err(ConfigError::Validation(format!(
                "bake.tag `{tag}` is not a valid cargo feature name"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_str("[bake\ninput ="),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_path_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assetbake.toml");
        fs::write(
            &path,
            "[bake]\ninput = \"web\"\noutput = \"/abs/assets.rs\"\n[serve]\npack = \"site.pack\"",
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.bake.input, Some(dir.path().join("web")));
        assert_eq!(config.bake.output, Some(PathBuf::from("/abs/assets.rs")));
        assert_eq!(config.serve.pack, Some(dir.path().join("site.pack")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assetbake.toml");
        fs::write(&path, "[bake]\ninput = \"web\"\nminify = true").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.bake.input, Some(dir.path().join("web")));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::from_path(&dir.path().join("nope.toml")),
            Err(ConfigError::Io(..))
        ));
    }

    #[test]
    fn test_update_option() {
        let mut value = Some("config".to_string());
        Config::update_option(&mut value, None);
        assert_eq!(value.as_deref(), Some("config"));
        Config::update_option(&mut value, Some(&"cli".to_string()));
        assert_eq!(value.as_deref(), Some("cli"));
    }

    #[test]
    fn test_validate_tag() {
        let mut config = Config::default();
        config.bake.tag = Some("embed".into());
        assert!(config.validate().is_ok());

        config.bake.tag = Some("bad tag".into());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
