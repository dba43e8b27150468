//! Text normalization for key and recipient sources.
//!
//! Credential files and variables share one format: `\n`-separated lines,
//! with lines whose trimmed content starts with `#` ignored.

/// Remove comment lines, keeping every other line exactly as written.
pub fn strip_comments(input: &str) -> String {
    input
        .split('\n')
        .filter(|line| !line.trim().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Private key lines: comments stripped, each line trimmed, blanks dropped.
pub fn key_lines(input: &str) -> Vec<String> {
    strip_comments(input)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recipient entries from a recipients file.
///
/// Lines are split on commas as-is. Blank lines and trailing commas survive
/// as empty entries.
pub fn file_recipients(input: &str) -> Vec<String> {
    strip_comments(input)
        .split('\n')
        .flat_map(|line| line.split(','))
        .map(str::to_string)
        .collect()
}

/// Recipient entries from an inline variable.
///
/// Each line is trimmed before splitting on commas; empty entries are kept.
pub fn inline_recipients(input: &str) -> Vec<String> {
    strip_comments(input)
        .split('\n')
        .map(str::trim)
        .flat_map(|line| line.split(','))
        .map(str::to_string)
        .collect()
}
