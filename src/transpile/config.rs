//! Transpiler output settings: optionally loaded from ~/.knodel/transpiler.yaml.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header emitted when no other header is configured.
pub const DEFAULT_HEADER: &str = "Generated by knodel";

/// Output formatting options for the [`Transpiler`](super::Transpiler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    /// Comment block written before any statement. `None` disables it.
    #[serde(default = "default_header")]
    pub header: Option<String>,
    /// Separate configuration statements from stream statements with one
    /// empty line.
    #[serde(default)]
    pub blank_line_after_config: bool,
}

fn default_header() -> Option<String> {
    Some(DEFAULT_HEADER.to_string())
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            blank_line_after_config: false,
        }
    }
}

impl TranspilerConfig {
    /// No header, no separator line.
    pub fn bare() -> Self {
        Self {
            header: None,
            blank_line_after_config: false,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = None;
        self
    }

    /// Standard config path (~/.knodel/transpiler.yaml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| Self::path_in(&h))
    }

    fn path_in(home: &Path) -> PathBuf {
        home.join(".knodel").join("transpiler.yaml")
    }

    /// Load config from the standard path.
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load() -> Option<Self> {
        Self::load_in(&dirs::home_dir()?)
    }

    /// Load `.knodel/transpiler.yaml` under `home`.
    pub fn load_in(home: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(Self::path_in(home)).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_header() {
        let config = TranspilerConfig::default();
        assert_eq!(config.header.as_deref(), Some(DEFAULT_HEADER));
        assert!(!config.blank_line_after_config);
    }

    #[test]
    fn serialize_deserialize() {
        let config = TranspilerConfig::default().with_header("-- mine");
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: TranspilerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_yaml_config() {
        let config: TranspilerConfig = serde_yaml::from_str("blank_line_after_config: true\n").unwrap();
        assert!(config.blank_line_after_config);
        assert_eq!(config.header.as_deref(), Some(DEFAULT_HEADER));

        let config: TranspilerConfig = serde_yaml::from_str("header: null\n").unwrap();
        assert_eq!(config, TranspilerConfig::bare());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header: \"-- live set\"").unwrap();
        let config = TranspilerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.header.as_deref(), Some("-- live set"));
    }

    #[test]
    fn load_from_invalid_file_is_invalid_data() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header: [unclosed").unwrap();
        let err = TranspilerConfig::load_from(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(TranspilerConfig::load_in(home.path()), None);
    }

    #[test]
    fn load_reads_knodel_dir_under_home() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".knodel");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("transpiler.yaml"), "blank_line_after_config: true\n").unwrap();
        let config = TranspilerConfig::load_in(home.path()).unwrap();
        assert!(config.blank_line_after_config);

        std::fs::write(dir.join("transpiler.yaml"), "header: [unclosed\n").unwrap();
        assert_eq!(TranspilerConfig::load_in(home.path()), None);
    }
}
