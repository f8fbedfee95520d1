use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ScanError;

/// Reads a source file, replacing invalid UTF-8 instead of failing on it.
pub fn read_source(file_path: &Path) -> Result<String, ScanError> {
    let read_err = |source| ScanError::Read {
        path: file_path.to_path_buf(),
        source,
    };

    let file = File::open(file_path).map_err(read_err)?;
    let file_size = file.metadata().map_err(read_err)?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut bytes = Vec::with_capacity(file_size);
    reader.read_to_end(&mut bytes).map_err(read_err)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Strips the leading semicolons and whitespace of an Elisp comment line.
pub fn strip_comment_prefix(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with(';') {
        return None;
    }
    Some(trimmed.trim_start_matches(';').trim())
}

/// Net count of open parentheses, ignoring those inside string literals.
pub fn paren_balance(text: &str) -> i32 {
    let mut depth = 0;
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
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
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// Byte offset of every line start, paired with whether that line begins
/// inside a string literal. Quotes in `;` comments and character literals
/// such as `?\"` do not open strings.
pub fn line_string_states(source: &str) -> Vec<(usize, bool)> {
    let mut states = vec![(0, false)];
    let mut in_string = false;
    let mut in_comment = false;
    let mut chars = source.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c == '\n' {
            in_comment = false;
            states.push((idx + 1, in_string));
            continue;
        }
        if in_comment {
            continue;
        }
        if in_string {
            match c {
                '\\' => {
                    // An escaped newline still starts a new line.
                    if let Some((next_idx, '\n')) = chars.next() {
                        states.push((next_idx + 1, true));
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            ';' => in_comment = true,
            '?' | '\\' => {
                if c == '?' && matches!(chars.peek(), Some((_, '\\'))) {
                    chars.next();
                }
                if let Some((_, '\n')) = chars.peek() {
                    continue;
                }
                chars.next();
            }
            _ => {}
        }
    }
    states
}

/// Whether the line containing byte `offset` begins inside a string literal.
pub fn line_starts_in_string(states: &[(usize, bool)], offset: usize) -> bool {
    let line = states.partition_point(|(start, _)| *start <= offset);
    line.checked_sub(1)
        .and_then(|idx| states.get(idx))
        .is_some_and(|(_, in_string)| *in_string)
}
