pub mod common;
pub mod elisp;

use serde::Serialize;
use std::path::Path;

use crate::error::ScanError;

pub use elisp::{ElispExtractor, ExtractionMode};

/// Deduplicated package names, kept in the order they were first declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet {
    names: Vec<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a lowercased `name`; returns false when it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn extend(&mut self, other: &DependencySet) {
        for name in other.iter() {
            self.insert(name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in alphabetical order, independent of discovery order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_unstable();
        names
    }
}

impl<'a> FromIterator<&'a str> for DependencySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Strategy for pulling dependency declarations out of source text.
pub trait DependencyExtractor {
    /// Returns the declared dependencies; no declarations yields an empty set.
    fn extract(&self, source: &str) -> DependencySet;

    fn extract_file(&self, path: &Path) -> Result<DependencySet, ScanError> {
        let source = common::read_source(path)?;
        Ok(self.extract(&source))
    }
}

