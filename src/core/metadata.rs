use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const UNCATEGORIZED: &str = "uncategorized";

const DEFAULT_METADATA: &str = include_str!("default_metadata.toml");

/// Static package metadata, loaded once and passed explicitly to consumers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataTable {
    #[serde(default)]
    graph: GraphConfig,
    #[serde(default)]
    packages: HashMap<String, PackageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphConfig {
    #[serde(default = "default_title")]
    title: String,
}

fn default_title() -> String {
    "Emacs Package Dependencies\n({repo})\nEmacs {version}".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PackageEntry {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    builtin: bool,
}

impl MetadataTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_METADATA).context("embedded metadata table is invalid")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let table: MetadataTable = toml::from_str(content)?;
        Ok(table.normalized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse metadata file {}", path.display()))
    }

    /// Loads `path` when given, otherwise falls back to the embedded table.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    fn normalized(mut self) -> Self {
        self.packages = self
            .packages
            .into_iter()
            .map(|(name, entry)| (name.to_lowercase(), entry))
            .collect();
        self
    }

    /// Expands `{repo}` and `{version}` in the configured graph title.
    pub fn graph_title(&self, repo: &str, version: &str) -> String {
        self.graph
            .title
            .replace("{repo}", repo)
            .replace("{version}", version)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Classification of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub description: Option<String>,
    pub category: String,
    pub builtin: bool,
}

impl PackageInfo {
    pub fn unknown() -> Self {
        Self {
            description: None,
            category: UNCATEGORIZED.to_string(),
            builtin: false,
        }
    }

    /// Category segments from outermost to innermost.
    pub fn category_path(&self) -> Vec<&str> {
        self.category
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetadataResolver<'a> {
    table: &'a MetadataTable,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(table: &'a MetadataTable) -> Self {
        Self { table }
    }

    /// Never fails: packages missing from the table are uncategorized third-party.
    pub fn resolve(&self, name: &str) -> PackageInfo {
        let Some(entry) = self.table.packages.get(&name.to_lowercase()) else {
            return PackageInfo::unknown();
        };

        let category = entry
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        PackageInfo {
            description: entry.description.clone().filter(|d| !d.trim().is_empty()),
            category: category.to_string(),
            builtin: entry.builtin,
        }
    }
}

