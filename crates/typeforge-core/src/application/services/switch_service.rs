//! Switch Service - toggle generated files between mock and live code.
//!
//! Files are independent, so each one is transformed on the rayon pool. One
//! bad file never stops the batch: failures are collected in the report.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Region, SwitchMode, markers},
    error::{TypeforgeError, TypeforgeResult},
};

/// Outcome of one switch run.
#[derive(Debug, Clone)]
pub struct SwitchReport {
    pub mode: SwitchMode,
    /// Files transformed successfully, in request order.
    pub processed: Vec<PathBuf>,
    /// Subset of `processed` whose content actually changed.
    pub changed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, TypeforgeError)>,
}

impl SwitchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SwitchService {
    filesystem: Box<dyn Filesystem>,
    dry_run: bool,
}

impl SwitchService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            dry_run: false,
        }
    }

    /// Transform without writing anything back.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Apply `mode` to every file. Paths naming the same file (`a.ts`,
    /// `./a.ts`) are processed once, under the first spelling given.
    #[instrument(skip_all, fields(mode = %mode, files = files.len(), dry_run = self.dry_run))]
    pub fn switch(&self, mode: SwitchMode, files: &[PathBuf]) -> SwitchReport {
        let mut seen = IndexSet::new();
        let unique: Vec<&PathBuf> = files
            .iter()
            .filter(|path| {
                let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                seen.insert(key)
            })
            .collect();

        let results: Vec<(PathBuf, TypeforgeResult<bool>)> = unique
            .par_iter()
            .map(|path| ((*path).clone(), self.switch_file(mode, path)))
            .collect();

        let mut report = SwitchReport {
            mode,
            processed: Vec::new(),
            changed: Vec::new(),
            failed: Vec::new(),
        };
        for (path, result) in results {
            match result {
                Ok(changed) => {
                    if changed {
                        report.changed.push(path.clone());
                    }
                    report.processed.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Switch failed");
                    report.failed.push((path, e));
                }
            }
        }

        info!(
            processed = report.processed.len(),
            changed = report.changed.len(),
            failed = report.failed.len(),
            "Switch completed"
        );
        report
    }

    /// Candidate files below `dir` with the given extension whose file name
    /// contains `pattern`.
    #[instrument(skip(self, dir, skip_dirs), fields(dir = %dir.display()))]
    pub fn discover(
        &self,
        dir: &Path,
        extension: &str,
        pattern: Option<&str>,
        skip_dirs: &[String],
    ) -> TypeforgeResult<Vec<PathBuf>> {
        if !self.filesystem.exists(dir) {
            return Err(ApplicationError::FileNotFound {
                path: dir.to_path_buf(),
            }
            .into());
        }

        let extension = extension.trim_start_matches('.');
        let found: Vec<PathBuf> = self
            .filesystem
            .walk_files(dir, skip_dirs)?
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .filter(|path| match pattern {
                Some(pattern) => path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().contains(pattern)),
                None => true,
            })
            .collect();

        debug!(count = found.len(), "Discovered files");
        Ok(found)
    }

    /// Marker regions of one file.
    pub fn inspect(&self, file: &Path) -> TypeforgeResult<Vec<Region>> {
        let text = self.read(file)?;
        Ok(markers::regions(&text)?)
    }

    fn switch_file(&self, mode: SwitchMode, path: &Path) -> TypeforgeResult<bool> {
        let text = self.read(path)?;
        let transformed = markers::transform(&text, mode)?;

        if transformed == text {
            debug!(path = %path.display(), "Already in target mode");
            return Ok(false);
        }
        if !self.dry_run {
            self.filesystem.write_file(path, &transformed)?;
        }
        debug!(path = %path.display(), "Switched");
        Ok(true)
    }

    fn read(&self, path: &Path) -> TypeforgeResult<String> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.filesystem.read_to_string(path)
    }
}
