use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the catalog.
///
/// Controls where the book database is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path to the JSON file holding the catalog.
    ///
    /// Relative paths are resolved against the working directory.
    pub database: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

impl Config {
    /// The name of the configuration file looked up in the working directory
    /// when none is given explicitly.
    pub const FILE_NAME: &'static str = "catalog.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Loads [`Config::FILE_NAME`] from `dir` if it exists.
    ///
    /// A missing or invalid file yields the default configuration.
    #[must_use]
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("data").join("book_database.json")
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_database")]
        database: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { database } => Self { database },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            database: config.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndatabase = \"shelf/books.json\"\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.database, PathBuf::from("shelf/books.json"));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndatabase = 3\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        let config = Config {
            database: PathBuf::from("elsewhere.json"),
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn discover_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(tmp.path()), Config::default());

        std::fs::write(tmp.path().join(Config::FILE_NAME), "not = [valid").unwrap();
        assert_eq!(Config::discover(tmp.path()), Config::default());
    }

    #[test]
    fn discover_reads_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(Config::FILE_NAME),
            "_version = \"1\"\ndatabase = \"mine.json\"\n",
        )
        .unwrap();

        assert_eq!(
            Config::discover(tmp.path()).database,
            PathBuf::from("mine.json")
        );
    }
}
