//! Configuration types for operon

use crate::OperonError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Required genes, in the order they must appear (forward or reversed)
    #[serde(default = "default_genes")]
    pub genes: Vec<String>,
    /// Annotation feature type to consider, matched case-insensitively
    #[serde(default = "default_feature_type")]
    pub feature_type: String,
    /// Exclusive upper bound on cluster span in bases
    #[serde(default = "default_max_len")]
    pub max_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for batch processing (0 = all available)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

// Default value functions
fn default_genes() -> Vec<String> { vec!["16s".to_string(), "23s".to_string()] }
fn default_feature_type() -> String { "rRNA".to_string() }
fn default_max_len() -> usize { 9_000 }
fn default_extension() -> String { "fna".to_string() }
fn default_line_width() -> usize { 60 }
fn default_threads() -> usize { 0 }

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            genes: default_genes(),
            feature_type: default_feature_type(),
            max_len: default_max_len(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            line_width: default_line_width(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl ExtractionConfig {
    pub fn normalized_genes(&self) -> Vec<String> {
        normalize_genes(&self.genes)
    }
}

/// Lower-cased, trimmed gene names with duplicates and blanks removed,
/// keeping the first occurrence of each.
pub fn normalize_genes<S: AsRef<str>>(genes: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(genes.len());
    for gene in genes {
        let gene = gene.as_ref().trim().to_lowercase();
        if !gene.is_empty() && !normalized.contains(&gene) {
            normalized.push(gene);
        }
    }
    normalized
}

impl Config {
    pub fn validate(&self) -> Result<(), OperonError> {
        if self.extraction.normalized_genes().is_empty() {
            return Err(OperonError::Configuration(
                "at least one gene is required".to_string(),
            ));
        }
        if self.extraction.feature_type.trim().is_empty() {
            return Err(OperonError::Configuration(
                "feature type must not be empty".to_string(),
            ));
        }
        if self.extraction.max_len == 0 {
            return Err(OperonError::Configuration(
                "max_len must be a positive integer".to_string(),
            ));
        }
        if self.output.line_width == 0 {
            return Err(OperonError::Configuration(
                "line_width must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, OperonError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), OperonError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| OperonError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.extraction.genes, vec!["16s", "23s"]);
        assert_eq!(config.extraction.feature_type, "rRNA");
        assert_eq!(config.extraction.max_len, 9_000);

        assert_eq!(config.output.extension, "fna");
        assert_eq!(config.output.line_width, 60);

        assert_eq!(config.performance.threads, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[extraction]
genes = ["16S", "23S", "5S"]
max_len = 7000
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.extraction.genes, vec!["16S", "23S", "5S"]);
        assert_eq!(config.extraction.max_len, 7000);
        // Defaults for unspecified fields
        assert_eq!(config.extraction.feature_type, "rRNA");
        assert_eq!(config.output.line_width, 60);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            OperonError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/config.toml").unwrap_err() {
            OperonError::Io(_) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalized_genes() {
        let config = ExtractionConfig {
            genes: vec![
                " 16S ".to_string(),
                "23s".to_string(),
                "16s".to_string(),
                "".to_string(),
            ],
            ..Default::default()
        };

        assert_eq!(config.normalized_genes(), vec!["16s", "23s"]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.extraction.genes = vec!["  ".to_string()];
        assert!(matches!(config.validate(), Err(OperonError::Configuration(_))));

        let mut config = Config::default();
        config.extraction.max_len = 0;
        assert!(matches!(config.validate(), Err(OperonError::Configuration(_))));

        let mut config = Config::default();
        config.extraction.feature_type = String::new();
        assert!(matches!(config.validate(), Err(OperonError::Configuration(_))));

        let mut config = Config::default();
        config.output.line_width = 0;
        assert!(matches!(config.validate(), Err(OperonError::Configuration(_))));
    }
}
