use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[sharplint]` section.
    pub sharplint: SharpLintConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for `SharpLint`.
pub struct SharpLintConfig {
    /// List of rule codes to ignore.
    pub ignore: Option<Vec<String>>,
    /// List of folders to exclude, on top of the defaults.
    pub exclude_folders: Option<Vec<String>>,
    /// Whether to apply fixes without `--fix`.
    pub fix: Option<bool>,
}

impl Config {
    /// Loads configuration from the current directory or its parents.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first `.sharplint.toml` found wins. A file that cannot be read or
    /// parsed is reported and skipped.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                match fs::read_to_string(&candidate)
                    .map_err(|e| e.to_string())
                    .and_then(|content| toml::from_str::<Config>(&content).map_err(|e| e.to_string()))
                {
                    Ok(mut config) => {
                        tracing::debug!(path = %candidate.display(), "loaded configuration");
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(path = %candidate.display(), "ignoring configuration: {e}");
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Rule codes to skip.
    #[must_use]
    pub fn ignored_rules(&self) -> &[String] {
        self.sharplint.ignore.as_deref().unwrap_or_default()
    }

    /// Folder exclusions on top of the defaults.
    #[must_use]
    pub fn exclude_folders(&self) -> &[String] {
        self.sharplint.exclude_folders.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_section() {
        let content = r#"
[sharplint]
ignore = ["SL-S001"]
exclude_folders = ["Generated"]
fix = true
"#;
        let config = toml::from_str::<Config>(content).unwrap();
        assert_eq!(config.ignored_rules(), ["SL-S001"]);
        assert_eq!(config.exclude_folders(), ["Generated"]);
        assert_eq!(config.sharplint.fix, Some(true));
    }

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.ignored_rules().is_empty());
        assert!(config.sharplint.fix.is_none());
    }

    #[test]
    fn test_load_from_path_walks_up() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILENAME)).unwrap();
        writeln!(
            file,
            r#"[sharplint]
ignore = ["SL-N001"]
"#
        )
        .unwrap();

        let nested = dir.path().join("src").join("Models");
        std::fs::create_dir_all(&nested).unwrap();
        let source = nested.join("Foo.cs");
        std::fs::write(&source, "class Foo { }").unwrap();

        let config = Config::load_from_path(&source);
        assert_eq!(config.ignored_rules(), ["SL-N001"]);
        assert_eq!(
            config.config_file_path.as_deref(),
            Some(dir.path().join(CONFIG_FILENAME).as_path())
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "[sharplint\nignore = 3").unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
    }
}
