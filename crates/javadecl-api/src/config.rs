use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Hand-authored declaration files living next to the generated output
pub const DEFAULT_RAW_FILES: [&str; 2] = ["minecraft-raw.d.ts", "forge-events-raw.d.ts"];

/// Configuration for parser behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum file size to parse (in bytes)
    /// Files larger than this are reported as failures
    pub max_file_size: usize,

    /// Enable parallel parsing (for `parse_files`)
    pub parallel: bool,

    /// Number of parallel workers (None = rayon default)
    pub parallel_workers: Option<usize>,

    /// Keep Javadoc blocks on extracted entities
    pub include_docs: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            parallel: false,
            parallel_workers: None,
            include_docs: true,
        }
    }
}

impl ParserConfig {
    /// Create config for fast parsing (parallel, no docs)
    pub fn fast() -> Self {
        Self {
            parallel: true,
            include_docs: false,
            ..Default::default()
        }
    }

    /// Enable parallel parsing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_workers == Some(0) {
            return Err(ConfigError::invalid(
                "parallel_workers must be greater than 0",
            ));
        }

        if self.max_file_size == 0 {
            return Err(ConfigError::invalid("max_file_size must be greater than 0"));
        }

        Ok(())
    }
}

/// Configuration for one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Roots scanned recursively for `.java` files
    pub source_dirs: Vec<PathBuf>,

    /// Root of the generated declaration tree
    pub output_dir: PathBuf,

    /// Dotted package prefixes eligible for cross-file imports
    pub api_packages: Vec<String>,

    /// Delete previously generated `.d.ts` files before generating
    pub clean_output: bool,

    /// File names never deleted by cleaning
    pub preserved_files: Vec<String>,

    /// Hand-maintained declarations copied to `<output_dir>/patches`
    pub patch_dir: Option<PathBuf>,

    /// Files referenced at the top of the hooks file, relative to `output_dir`
    pub hook_references: Vec<String>,

    /// Name of the global index file
    pub index_file: String,

    /// Name of the global hooks file
    pub hooks_file: String,

    /// Parser settings
    pub parser: ParserConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dirs: Vec::new(),
            output_dir: PathBuf::from("build/typings"),
            api_packages: Vec::new(),
            clean_output: false,
            preserved_files: DEFAULT_RAW_FILES.iter().map(|s| s.to_string()).collect(),
            patch_dir: None,
            hook_references: DEFAULT_RAW_FILES.iter().map(|s| s.to_string()).collect(),
            index_file: "index.d.ts".to_string(),
            hooks_file: "hooks.d.ts".to_string(),
            parser: ParserConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dirs.push(dir.into());
        self
    }

    pub fn with_api_package(mut self, package: impl Into<String>) -> Self {
        self.api_packages.push(package.into());
        self
    }

    pub fn with_clean_output(mut self, clean: bool) -> Self {
        self.clean_output = clean;
        self
    }

    pub fn with_patch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.patch_dir = Some(dir.into());
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.validate()?;

        if self.index_file.trim().is_empty() || self.hooks_file.trim().is_empty() {
            return Err(ConfigError::invalid(
                "index_file and hooks_file must not be empty",
            ));
        }

        if self.index_file == self.hooks_file {
            return Err(ConfigError::invalid(
                "index_file and hooks_file must differ",
            ));
        }

        if let Some(pkg) = self.api_packages.iter().find(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(format!(
                "api_packages contains an empty prefix: {pkg:?}"
            )));
        }

        Ok(())
    }

    /// Whether cleaning must spare a file with this name
    pub fn is_preserved(&self, file_name: &str) -> bool {
        self.preserved_files.iter().any(|p| p == file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.source_dirs.is_empty());
        assert!(!config.clean_output);
        assert_eq!(config.index_file, "index.d.ts");
        assert_eq!(config.hooks_file, "hooks.d.ts");
        assert!(config.is_preserved("minecraft-raw.d.ts"));
        assert!(config.is_preserved("forge-events-raw.d.ts"));
        assert!(!config.is_preserved("Foo.d.ts"));
        assert_eq!(config.parser.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_validate() {
        let mut config = ParserConfig::default();
        assert!(config.validate().is_ok());

        config.parallel_workers = Some(0);
        assert!(config.validate().is_err());

        config.parallel_workers = Some(4);
        assert!(config.validate().is_ok());

        config.max_file_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generator_validate() {
        let mut config = GeneratorConfig::default();
        assert!(config.validate().is_ok());

        config.hooks_file = config.index_file.clone();
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default().with_api_package(" ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "source_dirs": ["src/main/java"],
            "output_dir": "out",
            "api_packages": ["com.example.api"],
            "clean_output": true,
            "parser": { "parallel": true }
        }"#;

        let config = GeneratorConfig::from_json_str(json).unwrap();
        assert_eq!(config.source_dirs, vec![PathBuf::from("src/main/java")]);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.api_packages, vec!["com.example.api".to_string()]);
        assert!(config.clean_output);
        assert!(config.parser.parallel);
        assert!(config.parser.include_docs);
        assert_eq!(config.hooks_file, "hooks.d.ts");
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            GeneratorConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "parser": { "max_file_size": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("javadecl.json");
        fs::write(&path, r#"{ "api_packages": ["net.example"] }"#).unwrap();

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.api_packages, vec!["net.example".to_string()]);

        let missing = GeneratorConfig::from_json_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
