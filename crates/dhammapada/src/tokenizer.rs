//! Line classification for the verse text.
//!
//! The text is a flat run of lines: chapter headers, numbered verse starts,
//! continuation lines, and blank separators. A verse start is a run of digits
//! followed by a full stop and then whitespace or the end of the line, so
//! `1.` never matches `10.` or `1.5`.

use regex::Regex;

/// A classified line of the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `Chapter I. The Twin-Verses`
    Chapter(&'a str),
    /// `1. All that we are ...` split into the digit run and the remainder
    VerseStart { digits: &'a str, text: &'a str },
    /// Empty or whitespace-only
    Blank,
    /// Anything else
    Continuation(&'a str),
}

/// Tokenizer that splits the corpus into typed lines
pub struct LineTokenizer {
    chapter_pattern: Regex,
    verse_pattern: Regex,
}

impl Default for LineTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTokenizer {
    pub fn new() -> Self {
        Self {
            chapter_pattern: Regex::new(r"^Chapter(?:\s|$)").unwrap(),
            verse_pattern: Regex::new(r"^([0-9]+)\.(?:\s+(.*)|$)").unwrap(),
        }
    }

    /// Classify a single line (without its line terminator)
    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if line.trim().is_empty() {
            return Line::Blank;
        }

        if self.chapter_pattern.is_match(line) {
            return Line::Chapter(line.trim_end());
        }

        if let Some(caps) = self.verse_pattern.captures(line) {
            let digits = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            return Line::VerseStart { digits, text };
        }

        Line::Continuation(line)
    }
}

/// Parse the digit run of a verse start. Verse numbers start at 1.
pub fn verse_number(digits: &str) -> Option<u32> {
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}
