use crate::{
    config::ParserConfig, entities::SourceFile, errors::ParserError, metrics::ParserMetrics,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Information about a successfully parsed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path to the source file
    pub file_path: PathBuf,

    /// Extracted structure
    pub source: SourceFile,

    /// Time taken to parse this file
    #[serde(with = "duration_serde")]
    pub parse_time: Duration,

    /// Number of lines in the file
    pub line_count: usize,

    /// File size in bytes
    pub byte_count: usize,
}

// Helper module for serializing Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl FileInfo {
    /// Total declarations extracted, nested ones included
    pub fn type_count(&self) -> usize {
        self.source.type_count()
    }
}

/// Aggregate information about a batch of parsed files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Information about each successfully parsed file, in input order
    pub files: Vec<FileInfo>,

    /// Total number of declarations across all files
    pub total_types: usize,

    /// Total parse time for all files
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,

    /// Files that failed to parse (path, error message)
    pub failed_files: Vec<(PathBuf, String)>,
}

impl ProjectInfo {
    /// Record a successfully parsed file
    pub fn add_file(&mut self, info: FileInfo) {
        self.total_types += info.type_count();
        self.total_parse_time += info.parse_time;
        self.files.push(info);
    }

    /// Record a file that could not be parsed
    pub fn add_failure(&mut self, path: PathBuf, error: String) {
        self.failed_files.push((path, error));
    }

    /// Total number of files processed (success + failure)
    pub fn total_files(&self) -> usize {
        self.files.len() + self.failed_files.len()
    }

    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_files() == 0 {
            0.0
        } else {
            self.files.len() as f64 / self.total_files() as f64
        }
    }

    /// Average parse time per file
    pub fn avg_parse_time(&self) -> Duration {
        if self.files.is_empty() {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files.len() as u32
        }
    }
}

/// Core trait implemented by source parsers
///
/// A parser turns source text into a [`SourceFile`] tree. Parsing is
/// best-effort: malformed input yields fewer entities, never an error.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to support parallel parsing.
///
/// # Example
/// ```rust,ignore
/// use javadecl_api::{SourceParser, ParserConfig};
///
/// struct MyParser {
///     config: ParserConfig,
/// }
///
/// impl SourceParser for MyParser {
///     fn language(&self) -> &str {
///         "mylang"
///     }
///
///     fn file_extensions(&self) -> &[&str] {
///         &[".my"]
///     }
///
///     // ... implement other required methods
/// }
/// ```
pub trait SourceParser: Send + Sync {
    /// Returns the language identifier (lowercase, e.g., "java")
    fn language(&self) -> &str;

    /// Returns supported file extensions (e.g., [".java"])
    fn file_extensions(&self) -> &[&str];

    /// Parse a single file from disk
    ///
    /// **Note on Metrics**: This method updates parser metrics
    /// (files_attempted, files_succeeded, etc.). Use `metrics()` to retrieve
    /// statistics after parsing operations.
    ///
    /// # Errors
    /// Returns `ParserError` if the file cannot be read or is too large.
    fn parse_file(&self, path: &Path) -> Result<FileInfo, ParserError>;

    /// Parse source code held in memory
    ///
    /// **Note on Metrics**: This method does NOT update parser metrics.
    /// Only `parse_file()` updates metrics to avoid double-counting when
    /// `parse_source()` is called internally by `parse_file()`.
    ///
    /// # Arguments
    /// * `source` - Source code string
    /// * `file_path` - Logical path for this source (used in diagnostics)
    fn parse_source(&self, source: &str, file_path: &Path) -> Result<FileInfo, ParserError>;

    /// Parse multiple files (can be overridden for parallel parsing)
    ///
    /// Default implementation parses files sequentially. Results keep the
    /// order of `paths`; unreadable files are recorded in `failed_files`.
    fn parse_files(&self, paths: &[PathBuf]) -> Result<ProjectInfo, ParserError> {
        Ok(parse_files_sequential(self, paths))
    }

    /// Parse a directory recursively
    fn parse_directory(&self, dir: &Path) -> Result<ProjectInfo, ParserError> {
        let paths = self.discover_files(dir)?;
        self.parse_files(&paths)
    }

    /// Discover parseable files under `dir`, sorted by path
    ///
    /// Default implementation walks the directory, keeps files accepted by
    /// `can_parse` and drops those rejected by `should_skip`.
    fn discover_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ParserError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                ParserError::IoError(path, io)
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && self.can_parse(path) && !self.should_skip(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if this parser can handle the given file
    ///
    /// Default implementation checks file extension.
    fn can_parse(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy());
            self.file_extensions().contains(&ext_str.as_str())
        } else {
            false
        }
    }

    /// Files with a parseable extension that never describe an API type
    fn should_skip(&self, _path: &Path) -> bool {
        false
    }

    /// Get parser configuration
    fn config(&self) -> &ParserConfig;

    /// Get accumulated metrics
    fn metrics(&self) -> ParserMetrics;

    /// Reset metrics
    fn reset_metrics(&mut self);
}

/// Parse `paths` one after another with `parser`.
///
/// Shared by the default [`SourceParser::parse_files`] and by overrides that
/// only parallelize on demand.
pub fn parse_files_sequential<P>(parser: &P, paths: &[PathBuf]) -> ProjectInfo
where
    P: SourceParser + ?Sized,
{
    let mut project = ProjectInfo::default();

    for path in paths {
        match parser.parse_file(path) {
            Ok(info) => project.add_file(info),
            Err(e) => project.add_failure(path.clone(), e.to_string()),
        }
    }

    project
}
