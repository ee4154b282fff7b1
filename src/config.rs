//! Engine options
//!
//! Display and writer settings, loadable from TOML or YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options shared by text rendering and the format writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows shown by `Display` before the output is truncated
    pub display_max_rows: usize,
    /// Decimals printed for float cells; `None` prints the shortest form
    pub display_precision: Option<usize>,
    /// Text written for a missing cell
    pub na_rep: String,
    /// Field delimiter for delimited text
    pub csv_delimiter: char,
    /// Header written above the index column
    pub index_header: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            display_max_rows: 60,
            display_precision: None,
            na_rep: String::new(),
            csv_delimiter: ',',
            index_header: String::new(),
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TableConfig = toml::from_str(s)?;
        config.validate()
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: TableConfig = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(Error::Config(format!(
                "unsupported configuration file extension: {:?}",
                other
            ))),
        }
    }

    /// Delimiter as the single byte the csv crate expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.csv_delimiter.is_ascii() {
            Ok(self.csv_delimiter as u8)
        } else {
            Err(Error::Config(format!(
                "delimiter '{}' is not a single-byte character",
                self.csv_delimiter
            )))
        }
    }

    fn validate(self) -> Result<Self> {
        self.delimiter_byte()?;
        if self.display_max_rows == 0 {
            return Err(Error::Config("display_max_rows must be positive".to_string()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TableConfig::from_toml_str("na_rep = \"NaN\"\ncsv_delimiter = \";\"").unwrap();
        assert_eq!(config.na_rep, "NaN");
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!(config.display_max_rows, 60);
    }

    #[test]
    fn test_yaml_config() {
        let config = TableConfig::from_yaml_str("display_precision: 3\n").unwrap();
        assert_eq!(config.display_precision, Some(3));
    }

    #[test]
    fn test_invalid_delimiter() {
        assert!(matches!(
            TableConfig::from_toml_str("csv_delimiter = \"→\""),
            Err(Error::Config(_))
        ));
    }
}
