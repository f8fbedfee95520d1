use anyhow::Result;
use regex::Regex;

use super::common::{line_starts_in_string, line_string_states, paren_balance, strip_comment_prefix};
use super::{DependencyExtractor, DependencySet};

/// Which declaration forms contribute to a package's dependency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// `Package-Requires:` headers and top-level `require` forms.
    #[default]
    All,
    /// Only `Package-Requires:` headers.
    Header,
    /// Only `require` forms.
    Require,
}

impl ExtractionMode {
    fn reads_headers(self) -> bool {
        matches!(self, ExtractionMode::All | ExtractionMode::Header)
    }

    fn reads_requires(self) -> bool {
        matches!(self, ExtractionMode::All | ExtractionMode::Require)
    }
}

/// Regex-based extractor for Emacs Lisp dependency declarations.
pub struct ElispExtractor {
    mode: ExtractionMode,
    header_start: Regex,
    header_item: Regex,
    require_form: Regex,
}

impl ElispExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            mode: ExtractionMode::default(),
            header_start: Regex::new(r"(?i)^\s*;;;?\s*package-requires:\s*(.*)$")?,
            header_item: Regex::new(
                r#""(?:[^"\\]|\\.)*"|\(\s*([^\s()"';]+)[^)]*\)|([^\s()"';]+)"#,
            )?,
            require_form: Regex::new(
                r"(?m)^[ \t]*(?:\((?:eval-when-compile|eval-and-compile)[ \t]+)?\(require[ \t]+'([^\s()\x22';]+)",
            )?,
        })
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    fn extract_headers(&self, source: &str, deps: &mut DependencySet) {
        let lines: Vec<&str> = source.lines().collect();
        let mut i = 0;

        while i < lines.len() {
            let Some(caps) = self.header_start.captures(lines[i]) else {
                i += 1;
                continue;
            };

            // The list may continue over following comment lines.
            let mut list = caps[1].trim().to_string();
            while paren_balance(&list) > 0 && i + 1 < lines.len() {
                match strip_comment_prefix(lines[i + 1]) {
                    Some(rest) => {
                        list.push(' ');
                        list.push_str(rest);
                        i += 1;
                    }
                    None => break,
                }
            }

            if let Some(body) = outer_list_body(&list) {
                self.collect_header_items(body, deps);
            }
            i += 1;
        }
    }

    fn collect_header_items(&self, body: &str, deps: &mut DependencySet) {
        for caps in self.header_item.captures_iter(body) {
            // String literals match without a capture group and are dropped.
            let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let name = name.as_str();
            if name.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            deps.insert(name);
        }
    }

    fn extract_requires(&self, source: &str, deps: &mut DependencySet) {
        let states = line_string_states(source);
        for caps in self.require_form.captures_iter(source) {
            // Indented examples in docstrings look exactly like real forms.
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if line_starts_in_string(&states, whole.start()) {
                continue;
            }
            deps.insert(&caps[1]);
        }
    }
}

impl DependencyExtractor for ElispExtractor {
    fn extract(&self, source: &str) -> DependencySet {
        let mut deps = DependencySet::new();
        if self.mode.reads_headers() {
            self.extract_headers(source, &mut deps);
        }
        if self.mode.reads_requires() {
            self.extract_requires(source, &mut deps);
        }
        deps
    }
}

/// Contents of the leading parenthesized list, without the outer parens.
/// An unterminated list yields everything after the opening paren.
fn outer_list_body(list: &str) -> Option<&str> {
    let rest = list.trim_start().strip_prefix('(')?;

    let mut depth = 1;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, c) in rest.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..idx]);
                }
            }
            _ => {}
        }
    }
    Some(rest)
}
