use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::scanner::{FileScanner, PackageSources, SkippedPackage};
use crate::error::ScanError;
use crate::parsers::{DependencyExtractor, DependencySet, ElispExtractor, ExtractionMode};

/// Dependencies declared by one scanned package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependencies {
    pub name: String,
    pub dependencies: DependencySet,
}

/// Result of a full scan: packages in scan order plus those left out.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub root: PathBuf,
    pub packages: Vec<PackageDependencies>,
    pub skipped: Vec<SkippedPackage>,
}

impl Analysis {
    pub fn get(&self, name: &str) -> Option<&DependencySet> {
        self.packages
            .iter()
            .find(|package| package.name == name)
            .map(|package| &package.dependencies)
    }

    /// Last path component of the scanned root, used in graph titles.
    pub fn repo_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

pub struct DependencyAnalyzer {
    file_scanner: FileScanner,
    extractor: ElispExtractor,
}

impl DependencyAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            file_scanner: FileScanner::new(),
            extractor: ElispExtractor::new()?,
        })
    }

    pub fn with_only_main_file(mut self, only_main_file: bool) -> Self {
        self.file_scanner = self.file_scanner.with_only_main_file(only_main_file);
        self
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.extractor = self.extractor.with_mode(mode);
        self
    }

    /// Only a missing root aborts; unreadable packages are recorded as skipped.
    pub fn analyze(&self, root_path: &Path) -> Result<Analysis, ScanError> {
        info!("scanning packages in {}", root_path.display());
        let scan = self.file_scanner.scan_packages(root_path)?;
        info!(
            packages = scan.packages.len(),
            skipped = scan.skipped.len(),
            "scan finished"
        );

        let mut analysis = Analysis {
            root: root_path.to_path_buf(),
            packages: Vec::with_capacity(scan.packages.len()),
            skipped: scan.skipped,
        };

        for sources in &scan.packages {
            match self.extract_package(sources) {
                Ok(dependencies) => {
                    debug!(
                        package = %sources.name,
                        dependencies = dependencies.len(),
                        "extracted dependencies"
                    );
                    analysis.packages.push(PackageDependencies {
                        name: sources.name.clone(),
                        dependencies,
                    });
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping package '{}': {}", sources.name, err);
                    analysis.skipped.push(SkippedPackage {
                        name: sources.name.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(analysis)
    }

    fn extract_package(&self, sources: &PackageSources) -> Result<DependencySet, ScanError> {
        let mut dependencies = DependencySet::new();
        for file in &sources.files {
            dependencies.extend(&self.extractor.extract_file(file)?);
        }
        Ok(dependencies)
    }
}
