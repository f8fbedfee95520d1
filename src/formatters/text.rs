use crate::core::Analysis;
use crate::parsers::DependencySet;

/// Plain listing, one line per package in scan order.
pub struct TextFormatter {
    header: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self { header: true }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn format(&self, analysis: &Analysis) -> String {
        let mut out = String::new();

        if self.header {
            out.push_str("Detected Package Dependencies:\n");
        }

        if analysis.packages.is_empty() {
            out.push_str("  No dependencies found.\n");
        }
        for package in &analysis.packages {
            out.push_str("  - ");
            out.push_str(&format_entry(&package.name, &package.dependencies));
            out.push('\n');
        }

        if !analysis.skipped.is_empty() {
            out.push_str("\nSkipped packages:\n");
            for skipped in &analysis.skipped {
                out.push_str(&format!("  ! {}: {}\n", skipped.name, skipped.reason));
            }
        }

        out
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `name: {'dep-a', 'dep-b'}`, dependencies in discovery order.
pub fn format_entry(name: &str, dependencies: &DependencySet) -> String {
    let items: Vec<String> = dependencies.iter().map(|dep| format!("'{dep}'")).collect();
    format!("{name}: {{{}}}", items.join(", "))
}

