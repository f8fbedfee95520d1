use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ScanError;

const SOURCE_EXTENSION: &str = "el";

/// Source files selected for one package directory.
#[derive(Debug, Clone)]
pub struct PackageSources {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// A package left out of the results, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedPackage {
    #[serde(rename = "package")]
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct PackageScan {
    pub packages: Vec<PackageSources>,
    pub skipped: Vec<SkippedPackage>,
}

pub struct FileScanner {
    only_main_file: bool,
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            only_main_file: true,
        }
    }

    pub fn with_only_main_file(mut self, only_main_file: bool) -> Self {
        self.only_main_file = only_main_file;
        self
    }

    /// Treats every immediate subdirectory of `root_path` as one package.
    pub fn scan_packages(&self, root_path: &Path) -> Result<PackageScan, ScanError> {
        if !root_path.is_dir() {
            return Err(ScanError::RootNotFound(root_path.to_path_buf()));
        }

        // `foo/` and `foo.el/` name the same package; group before selecting.
        let mut groups: Vec<(String, Vec<PathBuf>)> = Vec::new();
        let package_dirs = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter(|entry| !is_hidden(entry.file_name().to_str()));

        for entry in package_dirs {
            let Some(name) = package_name(entry.path()) else {
                continue;
            };
            match groups.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, dirs)) => dirs.push(entry.into_path()),
                None => groups.push((name, vec![entry.into_path()])),
            }
        }

        let mut scan = PackageScan::default();
        for (name, dirs) in groups {
            match self.select_package(&name, &dirs) {
                Ok(sources) => {
                    debug!(package = %name, files = sources.files.len(), "selected package sources");
                    scan.packages.push(sources);
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping package '{}': {}", name, err);
                    scan.skipped.push(SkippedPackage {
                        name,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(scan)
    }

    /// Files from every directory of one package; fails only if none has any.
    fn select_package(&self, name: &str, dirs: &[PathBuf]) -> Result<PackageSources, ScanError> {
        let mut sources: Option<PackageSources> = None;
        let mut first_err = None;

        for dir in dirs {
            match self.select_files(name, dir) {
                Ok(files) => match sources.as_mut() {
                    Some(existing) => existing.files.extend(files),
                    None => {
                        sources = Some(PackageSources {
                            name: name.to_string(),
                            dir: dir.clone(),
                            files,
                        })
                    }
                },
                Err(err) => {
                    first_err.get_or_insert(err);
                }
            }
        }

        match (sources, first_err) {
            (Some(sources), _) => Ok(sources),
            (None, Some(err)) => Err(err),
            (None, None) => Err(ScanError::PackageFileNotFound {
                package: name.to_string(),
                dir: dirs.first().cloned().unwrap_or_default(),
            }),
        }
    }

    fn select_files(&self, name: &str, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let candidates = source_files(dir);

        let selected: Vec<PathBuf> = if self.only_main_file {
            main_file(name, candidates).into_iter().collect()
        } else {
            candidates
        };

        if selected.is_empty() {
            return Err(ScanError::PackageFileNotFound {
                package: name.to_string(),
                dir: dir.to_path_buf(),
            });
        }
        Ok(selected)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Package name for a directory: its name without a trailing `.el`, lowercased.
pub fn package_name(dir: &Path) -> Option<String> {
    let dir_name = dir.file_name()?.to_str()?;
    let name = dir_name
        .strip_suffix(".el")
        .filter(|stem| !stem.is_empty())
        .unwrap_or(dir_name);
    Some(name.to_lowercase())
}

/// The single `.el` file when there is exactly one, otherwise `<name>.el`.
fn main_file(name: &str, mut candidates: Vec<PathBuf>) -> Option<PathBuf> {
    if candidates.len() == 1 {
        return candidates.pop();
    }
    candidates.into_iter().find(|path| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case(name))
    })
}

fn source_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| !is_hidden(entry.file_name().to_str()))
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION))
        .collect()
}

fn is_hidden(file_name: Option<&str>) -> bool {
    file_name.is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_file_prefers_single_candidate() {
        let only = vec![PathBuf::from("/repo/x/other.el")];
        assert_eq!(main_file("x", only), Some(PathBuf::from("/repo/x/other.el")));

        let many = vec![
            PathBuf::from("/repo/x/x-utils.el"),
            PathBuf::from("/repo/x/x.el"),
        ];
        assert_eq!(main_file("x", many), Some(PathBuf::from("/repo/x/x.el")));

        let none = vec![PathBuf::from("/repo/x/a.el"), PathBuf::from("/repo/x/b.el")];
        assert_eq!(main_file("x", none), None);
    }
}
