//! Implementation of the SourceParser trait for Java

use javadecl_api::{
    parse_files_sequential, FileInfo, ParserConfig, ParserError, ParserMetrics, ProjectInfo,
    SourceParser,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::extractor;

/// Java source parser implementing the SourceParser trait
pub struct JavaParser {
    config: ParserConfig,
    metrics: Mutex<ParserMetrics>,
}

impl JavaParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            metrics: Mutex::new(ParserMetrics::default()),
        }
    }

    fn lock_metrics(&self) -> MutexGuard<'_, ParserMetrics> {
        // Metrics are plain counters; a panicked holder cannot corrupt them
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update_metrics(&self, result: &Result<FileInfo, ParserError>, duration: Duration) {
        let mut metrics = self.lock_metrics();
        metrics.files_attempted += 1;
        metrics.total_parse_time += duration;
        match result {
            Ok(info) => {
                metrics.files_succeeded += 1;
                metrics.total_types += info.type_count();
                metrics.total_methods += info.source.method_count();
                if info.source.is_empty() {
                    metrics.files_without_types += 1;
                }
            }
            Err(_) => metrics.files_failed += 1,
        }
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaParser {
    fn language(&self) -> &str {
        "java"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".java"]
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn parse_file(&self, path: &Path) -> Result<FileInfo, ParserError> {
        let start = Instant::now();
        let result = self.read_source(path).and_then(|source| self.parse_source(&source, path));

        if let Err(e) = &result {
            warn!(error = %e, "failed to parse file");
        }
        self.update_metrics(&result, start.elapsed());
        result
    }

    fn parse_source(&self, source: &str, file_path: &Path) -> Result<FileInfo, ParserError> {
        let start = Instant::now();
        let file = extractor::extract(source, file_path, &self.config);

        Ok(FileInfo {
            file_path: file_path.to_path_buf(),
            source: file,
            parse_time: start.elapsed(),
            line_count: source.lines().count(),
            byte_count: source.len(),
        })
    }

    fn parse_files(&self, paths: &[PathBuf]) -> Result<ProjectInfo, ParserError> {
        if self.config.parallel {
            self.parse_files_parallel(paths)
        } else {
            Ok(parse_files_sequential(self, paths))
        }
    }

    /// `package-info.java` only carries package annotations and docs
    fn should_skip(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "package-info.java")
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn metrics(&self) -> ParserMetrics {
        self.lock_metrics().clone()
    }

    fn reset_metrics(&mut self) {
        *self.lock_metrics() = ParserMetrics::default();
    }
}

impl JavaParser {
    fn read_source(&self, path: &Path) -> Result<String, ParserError> {
        let metadata =
            fs::metadata(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;

        if metadata.len() as usize > self.config.max_file_size {
            return Err(ParserError::FileTooLarge(
                path.to_path_buf(),
                metadata.len() as usize,
            ));
        }

        fs::read_to_string(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))
    }

    /// Parse files in parallel using rayon. Results keep the input order.
    fn parse_files_parallel(&self, paths: &[PathBuf]) -> Result<ProjectInfo, ParserError> {
        use rayon::prelude::*;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.parallel_workers {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| ParserError::ThreadPool(e.to_string()))?;

        debug!(
            files = paths.len(),
            threads = pool.current_num_threads(),
            "parsing in parallel"
        );

        let results: Vec<_> = pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    self.parse_file(path)
                        .map_err(|e| (path.clone(), e.to_string()))
                })
                .collect()
        });

        let mut project = ProjectInfo::default();
        for result in results {
            match result {
                Ok(info) => project.add_file(info),
                Err((path, error)) => project.add_failure(path, error),
            }
        }

        Ok(project)
    }
}
