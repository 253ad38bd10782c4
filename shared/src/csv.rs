//! CSV tokenizer for published sheet exports
//!
//! One record per non-blank line, keyed by the folded header. Quoting is
//! tracked with a single flag; bad quoting never errors, the scan just ends
//! in whatever state it reached.

use crate::record::{RawRecord, fold_key};

/// Split one line into fields.
///
/// `""` inside a quoted field is a literal quote; commas inside quotes do
/// not split.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Parse a whole export. The first non-blank line is the header.
pub fn parse(text: &str) -> Vec<RawRecord> {
    let mut lines = text
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = split_line(header_line).iter().map(|h| fold_key(h)).collect();

    lines
        .map(|line| {
            let mut values = split_line(line).into_iter();
            headers
                .iter()
                .map(|h| (h.as_str(), values.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}
