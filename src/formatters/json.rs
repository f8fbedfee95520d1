use anyhow::Result;
use serde_json::{json, Map, Value};

use crate::core::{Analysis, MetadataResolver};

/// Nested JSON report carrying the same dependency data as the text listing.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Pretty-printed report, packages in scan order.
    pub fn format(&self, analysis: &Analysis, resolver: &MetadataResolver) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value(analysis, resolver))?)
    }

    pub fn to_value(&self, analysis: &Analysis, resolver: &MetadataResolver) -> Value {
        let mut packages = Map::with_capacity(analysis.packages.len());
        for package in &analysis.packages {
            let info = resolver.resolve(&package.name);
            packages.insert(
                package.name.clone(),
                json!({
                    "dependencies": package.dependencies,
                    "builtin": info.builtin,
                    "category": info.category,
                    "description": info.description,
                }),
            );
        }

        json!({
            "packages": packages,
            "skipped": analysis.skipped,
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

