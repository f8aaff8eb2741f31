//! End-to-end generation: discover, parse, emit, write.

use javadecl_api::{GeneratorConfig, SourceParser};
use javadecl_java::JavaParser;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use walkdir::WalkDir;

use crate::emitter::{EmittedFile, Emitter};
use crate::error::{GeneratorError, Result};
use crate::paths::{declaration_path, DECLARATION_EXTENSION};

/// Name of the directory patch files are copied to, inside the output root
pub const PATCHES_DIR: &str = "patches";

/// Summary of one generator run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Source files the parser read successfully
    pub files_parsed: usize,
    /// Declaration files written, index and hooks excluded
    pub files_written: usize,
    /// Source files without a public top-level type
    pub files_skipped: usize,
    /// Declarations emitted, nested ones included
    pub types_emitted: usize,
    pub hooks_emitted: usize,
    /// Generated files removed before generating
    pub files_cleaned: usize,
    pub patches_copied: usize,
    /// Source files that could not be read, with the reason
    pub failed_files: Vec<(PathBuf, String)>,
    pub duration: Duration,
}

impl GenerationReport {
    /// Whether every discovered source file was read
    pub fn is_success(&self) -> bool {
        self.failed_files.is_empty()
    }
}

/// Drives one generation run over a [`GeneratorConfig`]
pub struct Generator {
    config: GeneratorConfig,
    parser: JavaParser,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let parser = JavaParser::with_config(config.parser.clone());
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline.
    ///
    /// Missing source directories are reported through logging and produce an
    /// empty report. Unreadable source files are collected in the report.
    /// Writing output fails fast.
    #[instrument(skip_all, fields(output = %self.config.output_dir.display()))]
    pub fn run(&self) -> Result<GenerationReport> {
        let start = Instant::now();
        let mut report = GenerationReport::default();

        if self.config.source_dirs.is_empty() {
            warn!("no source directories configured, nothing to generate");
            return Ok(report);
        }

        let roots: Vec<&PathBuf> = self
            .config
            .source_dirs
            .iter()
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    warn!(dir = %dir.display(), "source directory does not exist");
                }
                exists
            })
            .collect();
        if roots.is_empty() {
            error!("none of the configured source directories exist");
            return Ok(report);
        }

        let output_dir = &self.config.output_dir;
        if self.config.clean_output {
            report.files_cleaned = self.clean_output()?;
        }

        let (paths, relative) = self.discover(&roots)?;
        debug!(files = paths.len(), "discovered source files");

        let project = self.parser.parse_files(&paths)?;
        report.files_parsed = project.files.len();
        for (path, reason) in &project.failed_files {
            warn!(path = %path.display(), reason = %reason, "skipping unreadable source file");
        }
        report.failed_files = project.failed_files;

        let mut emitter = Emitter::new(&self.config);
        for info in &project.files {
            let Some(output_path) = relative.get(&info.file_path) else {
                continue;
            };
            match emitter.emit_file(&info.source, output_path) {
                Some(emitted) => {
                    write_emitted(output_dir, &emitted)?;
                    report.files_written += 1;
                }
                None => report.files_skipped += 1,
            }
        }

        for emitted in emitter.finish() {
            write_emitted(output_dir, &emitted)?;
        }
        report.types_emitted = emitter.type_registry().len();
        report.hooks_emitted = emitter.hook_registry().len();

        if let Some(patch_dir) = &self.config.patch_dir {
            report.patches_copied = self.copy_patches(patch_dir)?;
        }

        report.duration = start.elapsed();
        info!(
            parsed = report.files_parsed,
            written = report.files_written,
            skipped = report.files_skipped,
            failed = report.failed_files.len(),
            types = report.types_emitted,
            hooks = report.hooks_emitted,
            elapsed_ms = report.duration.as_millis() as u64,
            "generation complete"
        );
        Ok(report)
    }

    /// Sorted source files of every root, and the declaration path of each
    fn discover(&self, roots: &[&PathBuf]) -> Result<(Vec<PathBuf>, HashMap<PathBuf, String>)> {
        let mut paths = Vec::new();
        let mut relative = HashMap::new();
        let mut produced = HashSet::new();

        for root in roots {
            for path in self.parser.discover_files(root)? {
                let Ok(rel) = path.strip_prefix(root) else {
                    continue;
                };
                let output_path = declaration_path(rel);
                if !produced.insert(output_path.clone()) {
                    warn!(
                        path = %path.display(),
                        output = %output_path,
                        "output path already produced by another source root"
                    );
                }
                relative.insert(path.clone(), output_path);
                paths.push(path);
            }
        }
        Ok((paths, relative))
    }

    /// Delete generated declaration files under the output root, sparing
    /// preserved names, then prune directories left empty.
    fn clean_output(&self) -> Result<usize> {
        let output_dir = &self.config.output_dir;
        if !output_dir.is_dir() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in WalkDir::new(output_dir).contents_first(true) {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_file() {
                let name = entry.file_name().to_string_lossy();
                if name.ends_with(DECLARATION_EXTENSION) && !self.config.is_preserved(&name) {
                    fs::remove_file(path).map_err(|e| GeneratorError::io(path, e))?;
                    removed += 1;
                }
            } else if entry.file_type().is_dir() && path != output_dir.as_path() {
                let empty = fs::read_dir(path)
                    .map_err(|e| GeneratorError::io(path, e))?
                    .next()
                    .is_none();
                if empty {
                    fs::remove_dir(path).map_err(|e| GeneratorError::io(path, e))?;
                }
            }
        }

        debug!(removed, "cleaned output directory");
        Ok(removed)
    }

    /// Replace `<output>/patches` with a copy of `patch_dir`
    fn copy_patches(&self, patch_dir: &Path) -> Result<usize> {
        if !patch_dir.is_dir() {
            warn!(dir = %patch_dir.display(), "patch directory does not exist");
            return Ok(0);
        }

        let target = self.config.output_dir.join(PATCHES_DIR);
        if target.exists() {
            fs::remove_dir_all(&target).map_err(|e| GeneratorError::io(&target, e))?;
        }

        let mut copied = 0;
        for entry in WalkDir::new(patch_dir).sort_by_file_name() {
            let entry = entry?;
            let Ok(rel) = entry.path().strip_prefix(patch_dir) else {
                continue;
            };
            let dest = target.join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| GeneratorError::io(&dest, e))?;
            } else if entry.file_type().is_file() {
                fs::copy(entry.path(), &dest).map_err(|e| GeneratorError::io(&dest, e))?;
                copied += 1;
            }
        }

        debug!(copied, target = %target.display(), "copied patch files");
        Ok(copied)
    }
}

fn write_emitted(output_dir: &Path, emitted: &EmittedFile) -> Result<()> {
    let path = output_dir.join(&emitted.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
    }
    fs::write(&path, &emitted.contents).map_err(|e| GeneratorError::io(&path, e))
}
